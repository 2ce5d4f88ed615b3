mod builder;
mod config;
mod errors;
mod extraction;
mod routes;
mod state;
mod webhook;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{build_extractor, self_test};
use crate::routes::build_router;
use crate::state::AppState;
use crate::webhook::WebhookClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerOps API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the PDF extractor and prove the engine works before serving
    let extractor = build_extractor(config.extraction_strategy, config.extraction_timeout);
    self_test(extractor.as_ref())
        .await
        .context("PDF extraction engine failed its startup self-test")?;
    info!(
        "PDF extractor ready (strategy: {}, timeout: {}s)",
        extractor.strategy().as_str(),
        config.extraction_timeout.as_secs()
    );

    // Initialize webhook client
    let webhooks = WebhookClient::new(
        config.analyze_webhook_url.clone(),
        config.structure_webhook_url.clone(),
        config.webhook_timeout,
    )
    .context("Failed to build webhook HTTP client")?;
    info!("Webhook client initialized");

    // Build app state
    let state = AppState {
        extractor,
        webhooks,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin once it has a fixed deployment URL

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
