//! Service metadata served at `/`.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Handle `GET /`.
///
/// Static description of the service and the endpoints it supports.
async fn root() -> Json<Value> {
    // ---
    Json(json!({
        "message": "Cloudburst Early Warning System API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /sensor-data": "Submit sensor readings",
            "POST /trigger-cloudburst": "Push a synthetic cloudburst reading through the pipeline",
            "GET /latest-readings": "Get last 50 sensor readings",
            "GET /health": "Health check"
        }
    }))
}

/// Create a subrouter containing the `/` route.
///
/// Generic over the application state so it merges with any gateway.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
