//! Application entry point for the `cloudburst-sentinel` service.
//!
//! This binary orchestrates the full startup sequence for the cloudburst
//! early-warning API, including:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Building the history store, notifier and ingestion service
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests until Ctrl-C
//!
//! # Environment Variables
//! - `BIND_ADDR` (optional) – listen address (default: `0.0.0.0:8000`)
//! - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_NUMBER` (optional) –
//!   live SMS credentials; without them alerts run in mock mode
//! - `ALERT_RECIPIENTS` (optional) – comma-separated alert recipients
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config.rs` for the full list.
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;

use cloudburst_sentinel::{
    config, routes, telemetry, HistoryStore, IngestService, Notifier, QuerySurface,
};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    telemetry::init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let history = Arc::new(HistoryStore::new());
    let notifier = Notifier::from_config(&cfg);
    let query = QuerySurface::new(Arc::clone(&history), notifier.is_enabled());
    let service = IngestService::new(history, notifier);

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(service, query);

    tracing::info!("Listening on {}", cfg.bind_addr);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
