//! HTTP route gateway.
//!
//! Each sibling module exports a subrouter; this gateway merges them and
//! attaches the shared state so that `main.rs` never sees individual
//! endpoints (EMBP).

use axum::Router;

use crate::{IngestService, QuerySurface};

mod health;
mod latest_readings;
mod root;
mod sensor_data;
mod trigger;

// ---

/// Shared state handed to every handler.
pub type AppState = (IngestService, QuerySurface);

pub fn router(service: IngestService, query: QuerySurface) -> Router {
    // ---
    Router::new()
        .merge(root::router())
        .merge(health::router())
        .merge(sensor_data::router())
        .merge(trigger::router())
        .merge(latest_readings::router())
        .with_state((service, query))
}
