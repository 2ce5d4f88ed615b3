use std::fmt;

use thiserror::Error;

/// Failure classes of a whole extraction call.
///
/// Per-run decode failures are absent on purpose: they are recovered inside
/// the reassembly walk and never reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request carried no document.
    MissingInput,
    /// The document itself could not be parsed (corrupt, encrypted, timed out).
    ParseFailure,
    /// The parsing engine is missing or misconfigured. Operator-actionable.
    EngineUnavailable,
}

impl ErrorKind {
    /// Stable machine-readable code surfaced in HTTP error bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MissingInput => "MISSING_INPUT",
            ErrorKind::ParseFailure => "PARSE_FAILURE",
            ErrorKind::EngineUnavailable => "ENGINE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ExtractionError {
    kind: ErrorKind,
    message: String,
}

impl ExtractionError {
    pub fn missing_input() -> Self {
        Self {
            kind: ErrorKind::MissingInput,
            message: "no file provided".to_string(),
        }
    }

    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ParseFailure,
            message: message.into(),
        }
    }

    pub fn engine_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::EngineUnavailable,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The engine's diagnostic message, without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
