//! Webhook proxies and the ATS view.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::builder::{map_structured_resume, render_ats_text, ResumeData};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRequest {
    #[serde(default)]
    pub resume_text: String,
}

/// POST /api/analyze
///
/// Forwards resume and JD text to the analysis webhook and returns its reply
/// untouched.
pub async fn handle_analyze(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = request.map_err(invalid_body)?;
    if request.resume_text.trim().is_empty() || request.jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing resumeText or jdText".to_string(),
        ));
    }

    let analysis = state
        .webhooks
        .analyze(&request.resume_text, &request.jd_text)
        .await
        .map_err(AppError::Analyze)?;

    Ok(Json(analysis))
}

/// POST /api/structure
///
/// Asks the structuring webhook to split resume text into builder fields.
pub async fn handle_structure(
    State(state): State<AppState>,
    request: Result<Json<StructureRequest>, JsonRejection>,
) -> Result<Json<ResumeData>, AppError> {
    let Json(request) = request.map_err(invalid_body)?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Missing resumeText".to_string()));
    }

    let structured = state
        .webhooks
        .structure(&request.resume_text)
        .await
        .map_err(AppError::Structure)?;

    Ok(Json(map_structured_resume(&structured)))
}

/// POST /api/ats
pub async fn handle_ats(
    data: Result<Json<ResumeData>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(data) = data.map_err(invalid_body)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_ats_text(&data),
    ))
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}
