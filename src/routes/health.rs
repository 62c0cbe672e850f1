// src/routes/health.rs
//! API health check endpoint for the cloudburst service.
//!
//! This module defines the `/health` route used by container orchestrators,
//! the sensor generator, and CI pipelines to verify that the service is
//! running. It is a sibling module in the `routes` directory and follows the
//! Explicit Module Boundary Pattern (EMBP):
//! - Internal to this file: endpoint handler
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route
//!
//! Besides liveness the response reports how many readings are held and
//! whether the notifier has a live SMS channel, so a degraded notifier is
//! visible without failing the check.

use axum::{extract::State, routing::get, Json, Router};

use super::AppState;
use crate::query::Health;

/// Handle `GET /health`.
///
/// Always succeeds. Only reads the history size; never touches the
/// notification channel.
async fn health(State((_, query)): State<AppState>) -> Json<Health> {
    Json(query.health())
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
