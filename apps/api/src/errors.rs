use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extraction::{ErrorKind, ExtractionError};
use crate::webhook::WebhookError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {message}")]
    Upload { status: StatusCode, message: String },

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Analyze webhook error: {0}")]
    Analyze(WebhookError),

    #[error("Structure webhook error: {0}")]
    Structure(WebhookError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorBody) {
        let body = |error: &str, code, details: Option<String>| ErrorBody {
            error: error.to_string(),
            code,
            details,
        };

        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                body(msg, "VALIDATION_ERROR", None),
            ),
            AppError::Upload { status, message } => (
                *status,
                body("Failed to read upload", "UPLOAD_ERROR", Some(message.clone())),
            ),
            AppError::Extraction(e) => match e.kind() {
                ErrorKind::MissingInput => (
                    StatusCode::BAD_REQUEST,
                    body("No file provided", e.kind().code(), None),
                ),
                ErrorKind::ParseFailure => {
                    tracing::error!("PDF parse failure: {}", e.message());
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        body(
                            "Failed to parse PDF",
                            e.kind().code(),
                            Some(e.message().to_string()),
                        ),
                    )
                }
                ErrorKind::EngineUnavailable => {
                    tracing::error!("PDF engine unavailable: {}", e.message());
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        body("Failed to parse PDF", e.kind().code(), None),
                    )
                }
            },
            AppError::Analyze(e) => {
                tracing::error!("Analyze webhook error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body("Failed to analyze resume", "WEBHOOK_ERROR", None),
                )
            }
            AppError::Structure(e) => {
                tracing::error!("Structure webhook error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body("Failed to structure resume", "WEBHOOK_ERROR", None),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_bad_request() {
        let (status, body) = AppError::from(ExtractionError::missing_input()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "MISSING_INPUT");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_parse_failure_carries_engine_details() {
        let err = AppError::from(ExtractionError::parse_failure("invalid PDF: bad xref"));
        let (status, body) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to parse PDF");
        assert_eq!(body.details.as_deref(), Some("invalid PDF: bad xref"));
    }

    #[test]
    fn test_engine_unavailable_hides_details() {
        let err = AppError::from(ExtractionError::engine_unavailable("worker pool gone"));
        let (status, body) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "ENGINE_UNAVAILABLE");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_body_omits_absent_details() {
        let (_, body) = AppError::Validation("jdText cannot be empty".to_string()).parts();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "jdText cannot be empty", "code": "VALIDATION_ERROR"})
        );
    }

    #[test]
    fn test_upload_error_keeps_status() {
        let err = AppError::Upload {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        };
        assert_eq!(err.parts().0, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
