//! Outbound notification channel capability and its mock implementation.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::mask_number;
use crate::ChannelError;

// ---

/// Confirmation returned by a channel for one delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub delivery_id: String,
    pub delivery_status: String,
}

/// Something that can deliver a text message to a single recipient.
///
/// Implementations may fail; the [`Notifier`](super::Notifier) is
/// responsible for containing those failures.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Whether this channel performs real delivery.
    fn is_live(&self) -> bool;

    async fn send(&self, message: &str, recipient: &str) -> Result<Delivery, ChannelError>;
}

/// Channel used when no live credentials are configured.
///
/// Logs the message it would have sent and returns a synthetic delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockChannel;

#[async_trait]
impl NotificationChannel for MockChannel {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn send(&self, message: &str, recipient: &str) -> Result<Delivery, ChannelError> {
        // ---
        let delivery_id = synthetic_delivery_id();
        let recipient = mask_number(recipient);
        info!(%recipient, %delivery_id, "[mock] SMS not sent: {message}");

        Ok(Delivery {
            delivery_id,
            delivery_status: "mock_sent".to_string(),
        })
    }
}

/// Delivery id for outcomes that did not go through a live channel.
pub fn synthetic_delivery_id() -> String {
    format!("MOCK-{}", Uuid::new_v4().simple())
}
