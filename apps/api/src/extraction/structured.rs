use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::info;

use crate::extraction::engine::PageTreeEngine;
use crate::extraction::reassemble::reassemble;
use crate::extraction::worker::run_blocking;
use crate::extraction::{ExtractedText, ExtractionError, RawDocument, Strategy, TextExtractor};

/// Structured reconstruction: engine tree → decoded runs → text.
pub struct StructuredExtractor<E> {
    engine: Arc<E>,
    timeout: Duration,
}

impl<E: PageTreeEngine> StructuredExtractor<E> {
    pub fn new(engine: E, timeout: Duration) -> Self {
        Self {
            engine: Arc::new(engine),
            timeout,
        }
    }
}

#[async_trait]
impl<E: PageTreeEngine> TextExtractor for StructuredExtractor<E> {
    fn strategy(&self) -> Strategy {
        Strategy::Structured
    }

    async fn extract(&self, document: RawDocument) -> Result<ExtractedText, ExtractionError> {
        if document.is_empty() {
            return Err(ExtractionError::missing_input());
        }

        let started = Instant::now();
        let byte_len = document.len();
        let engine = Arc::clone(&self.engine);
        let engine_name = engine.name();

        let (text, pages, runs) = run_blocking(self.timeout, move |cancelled| {
            let tree = engine.parse(document.as_bytes(), cancelled)?;
            Ok((reassemble(&tree), tree.page_count(), tree.run_count()))
        })
        .await?;

        info!(
            engine = engine_name,
            bytes = byte_len,
            pages,
            runs,
            chars = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "structured extraction complete"
        );

        Ok(ExtractedText::new(text))
    }
}
