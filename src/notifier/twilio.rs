//! Live SMS delivery through the Twilio Messages REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::channel::{Delivery, NotificationChannel};
use crate::config::mask_number;
use crate::{ChannelError, TwilioConfig};

// ---

/// Sends SMS alerts with `POST /2010-04-01/Accounts/{sid}/Messages.json`.
///
/// Recipients without a leading `+` get the configured country code
/// prepended. The HTTP client carries its own timeout in addition to the
/// one the notifier enforces around every delivery.
pub struct TwilioChannel {
    client: reqwest::Client,
    config: TwilioConfig,
    country_code: String,
}

/// The subset of Twilio's message resource that we read back.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    status: String,
}

impl TwilioChannel {
    // ---
    pub fn new(
        config: TwilioConfig,
        country_code: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChannelError> {
        // ---
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            config,
            country_code: country_code.into(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn dial_number(&self, recipient: &str) -> String {
        // ---
        let recipient = recipient.trim();
        if recipient.starts_with('+') {
            recipient.to_string()
        } else {
            format!("{}{}", self.country_code, recipient)
        }
    }
}

#[async_trait]
impl NotificationChannel for TwilioChannel {
    fn name(&self) -> &'static str {
        "twilio"
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn send(&self, message: &str, recipient: &str) -> Result<Delivery, ChannelError> {
        // ---
        let to = self.dial_number(recipient);
        debug!(
            "Twilio send to {} via {}",
            mask_number(&to),
            self.messages_url()
        );

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", message),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let resource: MessageResource = response.json().await?;
        Ok(Delivery {
            delivery_id: resource.sid,
            delivery_status: resource.status,
        })
    }
}
