use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::webhook::WebhookClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Extraction strategy chosen and self-tested at startup.
    pub extractor: Arc<dyn TextExtractor>,
    pub webhooks: WebhookClient,
    pub config: Config,
}
