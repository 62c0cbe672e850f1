use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use tracing::{debug, warn};

use super::AppState;
use crate::{ClassifiedRecord, IngestError};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/sensor-data", post(handler))
}

/// The body is taken as raw bytes so that every shape error maps to a 400
/// with our own message rather than axum's extractor rejections.
async fn handler(
    State((service, _)): State<AppState>,
    body: Bytes,
) -> Result<Json<ClassifiedRecord>, IngestError> {
    // ---
    debug!("POST /sensor-data - {} bytes", body.len());

    let record = service.ingest(&body).inspect_err(|e| {
        warn!("Rejected sensor data: {}", e);
    })?;

    Ok(Json(record))
}
