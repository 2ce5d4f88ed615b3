pub mod health;
pub mod parse;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/parse",
            post(parse::handle_parse).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/analyze", post(resume::handle_analyze))
        .route("/api/structure", post(resume::handle_structure))
        .route("/api/ats", post(resume::handle_ats))
        .with_state(state)
}
