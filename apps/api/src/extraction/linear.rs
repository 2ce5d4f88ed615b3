use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::info;

use crate::extraction::worker::run_blocking;
use crate::extraction::{ExtractedText, ExtractionError, RawDocument, Strategy, TextExtractor};

/// Linear dump through `pdf-extract`. Line breaks are whatever the engine
/// emits; there is no page-boundary guarantee and no per-run recovery.
pub struct LinearExtractor {
    timeout: Duration,
}

impl LinearExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl TextExtractor for LinearExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Linear
    }

    async fn extract(&self, document: RawDocument) -> Result<ExtractedText, ExtractionError> {
        if document.is_empty() {
            return Err(ExtractionError::missing_input());
        }

        let started = Instant::now();
        let byte_len = document.len();

        let text = run_blocking(self.timeout, move |_cancelled| {
            pdf_extract::extract_text_from_mem(document.as_bytes())
                .map_err(|e| ExtractionError::parse_failure(e.to_string()))
        })
        .await?;
        let text = text.trim().to_string();

        info!(
            engine = "pdf-extract",
            bytes = byte_len,
            chars = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "linear extraction complete"
        );

        Ok(ExtractedText::new(text))
    }
}
