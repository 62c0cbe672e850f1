//! Best-effort alert fan-out.
//!
//! The notifier turns a classified reading into an alert message and, for
//! the cloudburst tier, attempts delivery to every configured recipient.
//! Delivery never fails from the caller's point of view: channel errors,
//! timeouts and panics are logged and downgraded to synthetic outcomes.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::mask_number;
use crate::{Config, Reading, Status};

mod channel;
mod twilio;

pub use channel::{synthetic_delivery_id, Delivery, MockChannel, NotificationChannel};
pub use twilio::TwilioChannel;

// ---

/// How a single recipient's alert was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Accepted by a live channel.
    Sent,
    /// No live channel configured; the mock channel stood in.
    MockSent,
    /// The live channel failed, timed out or panicked.
    MockFallback,
}

impl DeliveryStatus {
    pub const fn is_degraded(&self) -> bool {
        !matches!(self, Self::Sent)
    }
}

/// Per-recipient result of a notification attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub recipient: String,
    pub delivery_id: String,
    pub status: DeliveryStatus,
}

/// Alert dispatcher bound to one channel and one recipient list.
#[derive(Clone)]
pub struct Notifier {
    channel: Arc<dyn NotificationChannel>,
    recipients: Arc<[String]>,
    timeout: Duration,
}

impl Notifier {
    // ---
    pub fn new(
        channel: Arc<dyn NotificationChannel>,
        recipients: Vec<String>,
        timeout: Duration,
    ) -> Self {
        // ---
        Self {
            channel,
            recipients: recipients.into(),
            timeout,
        }
    }

    /// Build the notifier described by the loaded configuration.
    ///
    /// Uses Twilio when credentials are present. Missing credentials, or a
    /// live client that cannot be constructed, leave the notifier in mock
    /// mode instead of failing startup.
    pub fn from_config(config: &Config) -> Self {
        // ---
        let timeout = Duration::from_secs(config.notifier_timeout_secs.into());

        let channel: Arc<dyn NotificationChannel> = match &config.twilio {
            Some(twilio) => {
                match TwilioChannel::new(twilio.clone(), &config.alert_country_code, timeout) {
                    Ok(live) => Arc::new(live),
                    Err(e) => {
                        error!("Failed to initialise Twilio client, using mock channel: {}", e);
                        Arc::new(MockChannel)
                    }
                }
            }
            None => {
                warn!("Twilio credentials not configured, SMS alerts run in mock mode");
                Arc::new(MockChannel)
            }
        };

        Self::new(channel, config.alert_recipients.clone(), timeout)
    }

    /// Whether a live delivery channel is configured.
    pub fn is_enabled(&self) -> bool {
        self.channel.is_live()
    }

    /// Raise the alert for `status` and return one outcome per recipient.
    ///
    /// Only `cloudburst_detected` performs delivery. `warning` is logged and
    /// `safe` is ignored; both return an empty list.
    pub async fn notify(
        &self,
        status: Status,
        reading: &Reading,
        recipients: &[String],
    ) -> Vec<DeliveryOutcome> {
        // ---
        match status {
            Status::Safe => Vec::new(),
            Status::Warning => {
                warn!("{}", warning_message(reading));
                Vec::new()
            }
            Status::CloudburstDetected => {
                let message = cloudburst_message(reading);
                error!("{}", message);

                let mut outcomes = Vec::with_capacity(recipients.len());
                for recipient in recipients {
                    outcomes.push(self.deliver(&message, recipient).await);
                }
                outcomes
            }
        }
    }

    /// Hand the alert for `status` to a background task.
    ///
    /// Returns `None` for `safe`, and when called outside a tokio runtime, in
    /// which case the alert is logged but not delivered. The caller is free to
    /// drop the handle; the task runs to completion either way.
    pub fn dispatch(
        &self,
        status: Status,
        reading: Reading,
    ) -> Option<JoinHandle<Vec<DeliveryOutcome>>> {
        // ---
        if !status.is_alert() {
            return None;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("{} alert not dispatched, no async runtime: {}", status, e);
                return None;
            }
        };

        let notifier = self.clone();
        Some(runtime.spawn(async move {
            let recipients = Arc::clone(&notifier.recipients);
            notifier.notify(status, &reading, &recipients).await
        }))
    }

    async fn deliver(&self, message: &str, recipient: &str) -> DeliveryOutcome {
        // ---
        let channel = Arc::clone(&self.channel);
        let (body, to) = (message.to_owned(), recipient.to_owned());

        // The send runs on its own task so a panicking channel cannot unwind into us
        let mut task = tokio::spawn(async move { channel.send(&body, &to).await });

        let failure = match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(Ok(delivery))) => {
                let status = if self.channel.is_live() {
                    DeliveryStatus::Sent
                } else {
                    DeliveryStatus::MockSent
                };
                info!(
                    "Alert SMS to {} via {}: id={} status={}",
                    mask_number(recipient),
                    self.channel.name(),
                    delivery.delivery_id,
                    delivery.delivery_status
                );
                return DeliveryOutcome {
                    recipient: recipient.to_owned(),
                    delivery_id: delivery.delivery_id,
                    status,
                };
            }
            Ok(Ok(Err(e))) => e.to_string(),
            Ok(Err(e)) => format!("delivery task aborted: {e}"),
            Err(_) => {
                task.abort();
                format!("no response within {:?}", self.timeout)
            }
        };

        error!(
            "Alert SMS to {} via {} failed, falling back to mock: {}",
            mask_number(recipient),
            self.channel.name(),
            failure
        );
        DeliveryOutcome {
            recipient: recipient.to_owned(),
            delivery_id: synthetic_delivery_id(),
            status: DeliveryStatus::MockFallback,
        }
    }
}

/// Critical alert text for the cloudburst tier.
pub fn cloudburst_message(reading: &Reading) -> String {
    format!(
        "ALERT: Cloudburst detected! Rainfall: {}mm/hr, Humidity: {}%, Pressure: {}hPa. \
         Stay safe and avoid low-lying regions.",
        reading.rainfall, reading.humidity, reading.pressure
    )
}

/// Log-only alert text for the warning tier.
pub fn warning_message(reading: &Reading) -> String {
    format!(
        "WARNING: High rainfall detected. Rainfall: {}mm/hr",
        reading.rainfall
    )
}
