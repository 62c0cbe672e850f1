use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

use super::AppState;
use crate::ClassifiedRecord;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/latest-readings", get(handler))
}

async fn handler(State((_, query)): State<AppState>) -> Json<Vec<ClassifiedRecord>> {
    // ---
    let readings = query.latest_readings();
    info!("Retrieved {} latest readings", readings.len());
    Json(readings)
}
