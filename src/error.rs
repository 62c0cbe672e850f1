//! Error types for the ingest path and the notification channel.
//!
//! Only [`IngestError`] ever reaches an HTTP caller. [`ChannelError`] is
//! absorbed inside the notifier and turned into a degraded delivery outcome.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to the caller of `/sensor-data`.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The body could not be parsed into the four numeric reading fields.
    #[error("Invalid sensor data: {0}")]
    InvalidInput(String),
}

impl IngestError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Failures of a single outbound delivery attempt.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("request to notification channel failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification channel rejected message with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}
