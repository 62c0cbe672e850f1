//! Ingestion service: validate, classify, record, notify.
//!
//! The record is stamped and appended to the history in one critical
//! section. Alert delivery is handed to a background task and never delays
//! or fails the response.

use std::sync::Arc;

use tracing::{error, info};

use crate::classifier::classify;
use crate::history::{Clock, HistoryStore, SystemClock};
use crate::notifier::{DeliveryOutcome, Notifier};
use crate::{ClassifiedRecord, IngestError, Reading};

// ---

#[derive(Clone)]
pub struct IngestService {
    history: Arc<HistoryStore>,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
}

impl IngestService {
    // ---
    pub fn new(history: Arc<HistoryStore>, notifier: Notifier) -> Self {
        Self::with_clock(history, notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(
        history: Arc<HistoryStore>,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            history,
            notifier,
            clock,
        }
    }

    /// Parse a raw JSON body and process it.
    ///
    /// Fails only when the body is not a reading; nothing is recorded then.
    pub fn ingest(&self, body: &[u8]) -> Result<ClassifiedRecord, IngestError> {
        // ---
        let reading = Reading::from_json(body)?;
        Ok(self.process(reading))
    }

    /// Classify and record a reading, dispatching any alert in the background.
    ///
    /// Outside a tokio runtime the reading is still recorded and the alert is
    /// only logged.
    pub fn process(&self, reading: Reading) -> ClassifiedRecord {
        // ---
        let (record, _pending) = self.record_and_dispatch(reading);
        record
    }

    /// Like [`process`](Self::process) but waits for the alert outcomes.
    ///
    /// Used by the demo trigger so the caller can see what was delivered.
    pub async fn process_awaiting_alerts(
        &self,
        reading: Reading,
    ) -> (ClassifiedRecord, Vec<DeliveryOutcome>) {
        // ---
        let (record, pending) = self.record_and_dispatch(reading);

        let outcomes = match pending {
            Some(task) => task.await.unwrap_or_else(|e| {
                error!("Alert dispatch task failed: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        (record, outcomes)
    }

    fn record_and_dispatch(
        &self,
        reading: Reading,
    ) -> (
        ClassifiedRecord,
        Option<tokio::task::JoinHandle<Vec<DeliveryOutcome>>>,
    ) {
        // ---
        let status = classify(&reading);
        let record = self
            .history
            .append_stamped(status, reading, self.clock.as_ref());

        info!(
            "Processed sensor data: {} - {}",
            record.status,
            record.timestamp.to_rfc3339()
        );

        let pending = self.notifier.dispatch(status, reading);
        (record, pending)
    }
}
