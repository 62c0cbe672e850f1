use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use tracing::info;

use super::AppState;
use crate::notifier::DeliveryOutcome;
use crate::{ClassifiedRecord, Reading};

// ---

/// Reading forced through the pipeline by the demo trigger.
pub const SYNTHETIC_CLOUDBURST: Reading = Reading {
    rainfall: 75.0,
    humidity: 95.0,
    temperature: 18.0,
    pressure: 985.0,
};

#[derive(Serialize)]
struct TriggerResponse {
    #[serde(flatten)]
    record: ClassifiedRecord,
    alerts: Vec<DeliveryOutcome>,
}

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/trigger-cloudburst", post(handler))
}

/// Manual verification hook: unlike `/sensor-data` this waits for the
/// delivery outcomes and returns them.
async fn handler(State((service, _)): State<AppState>) -> Json<TriggerResponse> {
    // ---
    info!("POST /trigger-cloudburst - injecting synthetic reading");

    let (record, alerts) = service.process_awaiting_alerts(SYNTHETIC_CLOUDBURST).await;
    Json(TriggerResponse { record, alerts })
}
