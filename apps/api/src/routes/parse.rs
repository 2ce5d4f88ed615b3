use axum::{
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{ExtractionError, RawDocument};
use crate::state::AppState;

/// Multipart field names accepted for the uploaded PDF.
const FILE_FIELDS: [&str; 2] = ["file", "pdf"];

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub text: String,
}

/// POST /api/parse
///
/// Extracts plain text from an uploaded PDF. The upload is held only for the
/// duration of the extraction and never logged beyond its size.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, AppError> {
    let upload_id = Uuid::new_v4();

    let mut multipart = multipart.map_err(|rejection| {
        warn!(%upload_id, "Rejected non-multipart upload: {rejection}");
        ExtractionError::missing_input()
    })?;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or("").to_string();
        if !FILE_FIELDS.contains(&name.as_str()) {
            continue;
        }

        let data = field.bytes().await.map_err(upload_error)?;
        info!(%upload_id, field = %name, bytes = data.len(), "Received resume upload");

        let text = state.extractor.extract(RawDocument::from(data)).await?;
        return Ok(Json(ParseResponse {
            text: text.into_string(),
        }));
    }

    warn!(%upload_id, "No file field found in multipart upload");
    Err(ExtractionError::missing_input().into())
}

fn upload_error(e: MultipartError) -> AppError {
    AppError::Upload {
        status: e.status(),
        message: e.body_text(),
    }
}
