//! Read-only access to the history store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::history::HistoryStore;
use crate::ClassifiedRecord;

// ---

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub readings_count: usize,
    pub notifier_enabled: bool,
}

#[derive(Clone)]
pub struct QuerySurface {
    history: Arc<HistoryStore>,
    notifier_enabled: bool,
}

impl QuerySurface {
    // ---
    pub fn new(history: Arc<HistoryStore>, notifier_enabled: bool) -> Self {
        Self {
            history,
            notifier_enabled,
        }
    }

    pub fn health(&self) -> Health {
        // ---
        Health {
            status: "healthy",
            timestamp: Utc::now(),
            readings_count: self.history.count(),
            notifier_enabled: self.notifier_enabled,
        }
    }

    /// Snapshot of the history, oldest to newest.
    pub fn latest_readings(&self) -> Vec<ClassifiedRecord> {
        self.history.snapshot()
    }
}
