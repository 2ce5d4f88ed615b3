//! PDF text extraction.
//!
//! Two strategies sit behind [`TextExtractor`]:
//! - [`StructuredExtractor`] (default) asks a [`PageTreeEngine`] for a
//!   page/block/run tree and rebuilds the text from percent-encoded runs.
//! - [`LinearExtractor`] hands the whole document to `pdf-extract`.
//!
//! The strategy is fixed at startup and verified with [`self_test`] before
//! the server accepts requests.

pub mod decode;
pub mod engine;
pub mod error;
pub mod linear;
pub mod sample;
pub mod reassemble;
pub mod structured;
pub mod tree;
pub mod worker;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

pub use engine::{LopdfEngine, PageTreeEngine};
pub use error::{ErrorKind, ExtractionError};
pub use linear::LinearExtractor;
pub use structured::StructuredExtractor;

/// Uploaded document bytes. Owned by exactly one extraction call and
/// released when that call returns.
#[derive(Debug)]
pub struct RawDocument {
    bytes: Arc<[u8]>,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Bytes> for RawDocument {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes.as_ref())
    }
}

/// Final extraction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Structured,
    Linear,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Structured => "structured",
            Strategy::Linear => "linear",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(Strategy::Structured),
            "linear" => Ok(Strategy::Linear),
            other => Err(format!(
                "unknown extraction strategy '{other}' (expected 'structured' or 'linear')"
            )),
        }
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    fn strategy(&self) -> Strategy;

    async fn extract(&self, document: RawDocument) -> Result<ExtractedText, ExtractionError>;
}

pub fn build_extractor(strategy: Strategy, timeout: Duration) -> Arc<dyn TextExtractor> {
    match strategy {
        Strategy::Structured => Arc::new(StructuredExtractor::new(LopdfEngine, timeout)),
        Strategy::Linear => Arc::new(LinearExtractor::new(timeout)),
    }
}

/// Extracts the built-in sample document. Any failure means the engine cannot
/// serve requests and is reported as [`ErrorKind::EngineUnavailable`].
pub async fn self_test(extractor: &dyn TextExtractor) -> Result<(), ExtractionError> {
    let pdf = sample::sample_document().map_err(|e| {
        ExtractionError::engine_unavailable(format!("cannot build sample document: {e}"))
    })?;

    let text = extractor
        .extract(RawDocument::new(pdf))
        .await
        .map_err(|e| ExtractionError::engine_unavailable(format!("self-test failed: {e}")))?;

    let squash = |s: &str| s.split_whitespace().collect::<String>();
    if !squash(text.as_str()).contains(&squash(sample::SAMPLE_TEXT)) {
        return Err(ExtractionError::engine_unavailable(format!(
            "self-test returned unexpected text ({} chars)",
            text.as_str().len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parses_case_insensitively() {
        assert_eq!(" Linear ".parse::<Strategy>(), Ok(Strategy::Linear));
        assert_eq!("STRUCTURED".parse::<Strategy>(), Ok(Strategy::Structured));
        assert!("ocr".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_raw_document_from_bytes() {
        let doc = RawDocument::from(Bytes::from_static(b"%PDF-1.7"));
        assert_eq!(doc.len(), 8);
        assert!(!doc.is_empty());
        assert_eq!(doc.as_bytes(), b"%PDF-1.7");
    }

    #[test]
    fn test_extracted_text_serializes_as_string() {
        let text = ExtractedText::new("Rust".to_string());
        assert_eq!(serde_json::to_value(&text).unwrap(), "Rust");
    }

    #[tokio::test]
    async fn test_structured_strategy_passes_self_test() {
        let extractor = build_extractor(Strategy::Structured, Duration::from_secs(10));
        assert_eq!(extractor.strategy(), Strategy::Structured);
        self_test(extractor.as_ref()).await.unwrap();
    }

    struct BrokenEngine;

    impl PageTreeEngine for BrokenEngine {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn parse(
            &self,
            _bytes: &[u8],
            _cancelled: &dyn Fn() -> bool,
        ) -> Result<tree::PageTree, ExtractionError> {
            Err(ExtractionError::parse_failure("no backend"))
        }
    }

    #[tokio::test]
    async fn test_broken_engine_fails_self_test_as_unavailable() {
        let extractor = StructuredExtractor::new(BrokenEngine, Duration::from_secs(5));
        let err = self_test(&extractor).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineUnavailable);
        assert!(err.message().contains("no backend"));
    }
}
