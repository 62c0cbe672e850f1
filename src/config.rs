//! Configuration loader for the `cloudburst-sentinel` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
//! Nothing here is required: without Twilio credentials the service starts
//! with its notifier in mock mode.
use std::{env, net::SocketAddr};

use anyhow::{anyhow, Result};

use crate::generator::GeneratorMode;

/// Default Twilio REST API base URL.
pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, treating blank as unset.
macro_rules! optional_env {
    ($var_name:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
}

/// Credentials and sender identity for the live SMS channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    // ---
    pub account_sid: String,
    pub auth_token: String,
    /// Sender phone number, in E.164 form.
    pub from_number: String,
    /// API base URL, overridable for testing against a stand-in server.
    pub api_base: String,
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Live SMS channel, present only when all three credentials are set.
    pub twilio: Option<TwilioConfig>,

    /// Recipients of cloudburst alerts.
    pub alert_recipients: Vec<String>,

    /// Prefix applied to recipients that lack a leading `+`.
    pub alert_country_code: String,

    /// Upper bound on a single outbound delivery, in seconds.
    pub notifier_timeout_secs: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8000`)
/// - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_NUMBER` – live SMS
///   credentials; all three must be set to enable the live channel
/// - `TWILIO_API_BASE` – API base URL (default: `https://api.twilio.com`)
/// - `ALERT_RECIPIENTS` – comma-separated phone numbers (default: none)
/// - `ALERT_COUNTRY_CODE` – dialing prefix (default: `+91`)
/// - `NOTIFIER_TIMEOUT_SECS` – per-delivery timeout (default: 5)
///
/// Returns an error if any variable that is set cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    // ---
    let bind_addr = optional_env!("BIND_ADDR")
        .unwrap_or_else(|| "0.0.0.0:8000".to_string())
        .parse::<SocketAddr>()
        .map_err(|e| anyhow!("Invalid BIND_ADDR: {}", e))?;

    let twilio = match (
        optional_env!("TWILIO_ACCOUNT_SID"),
        optional_env!("TWILIO_AUTH_TOKEN"),
        optional_env!("TWILIO_NUMBER"),
    ) {
        (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioConfig {
            account_sid,
            auth_token,
            from_number,
            api_base: optional_env!("TWILIO_API_BASE")
                .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE.to_string()),
        }),
        _ => None,
    };

    let alert_recipients =
        parse_recipients(&optional_env!("ALERT_RECIPIENTS").unwrap_or_default());
    let alert_country_code = optional_env!("ALERT_COUNTRY_CODE").unwrap_or_else(|| "+91".into());
    let notifier_timeout_secs = parse_env_u32!("NOTIFIER_TIMEOUT_SECS", 5).max(1);

    Ok(Config {
        bind_addr,
        twilio,
        alert_recipients,
        alert_country_code,
        notifier_timeout_secs,
    })
}

/// Configuration for the `sensor-generator` binary.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    // ---
    /// Base URL of the ingestion service.
    pub api_url: String,

    /// Seconds between readings.
    pub interval_secs: u32,

    pub mode: GeneratorMode,
}

/// Load generator configuration from environment variables with defaults.
///
/// Optional:
/// - `GENERATOR_API_URL` – service base URL (default: `http://localhost:8000`)
/// - `GENERATOR_INTERVAL_SECS` – seconds between readings (default: 5)
/// - `GENERATOR_MODE` – `realistic` or `random` (default: `realistic`)
pub fn load_generator_from_env() -> Result<GeneratorConfig> {
    // ---
    let api_url = optional_env!("GENERATOR_API_URL")
        .unwrap_or_else(|| "http://localhost:8000".to_string())
        .trim_end_matches('/')
        .to_string();
    let interval_secs = parse_env_u32!("GENERATOR_INTERVAL_SECS", 5).max(1);
    let mode = match optional_env!("GENERATOR_MODE") {
        Some(raw) => raw
            .parse()
            .map_err(|e: String| anyhow!("Invalid GENERATOR_MODE: {}", e))?,
        None => GeneratorMode::Realistic,
    };

    Ok(GeneratorConfig {
        api_url,
        interval_secs,
        mode,
    })
}

/// Split a comma-separated recipient list, dropping blank entries.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the Twilio auth token and all but the last four digits of each
    /// recipient number.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR             : {}", self.bind_addr);
        match &self.twilio {
            Some(twilio) => {
                tracing::info!("  TWILIO_ACCOUNT_SID    : {}", twilio.account_sid);
                tracing::info!("  TWILIO_AUTH_TOKEN     : ****");
                tracing::info!("  TWILIO_NUMBER         : {}", twilio.from_number);
                tracing::info!("  TWILIO_API_BASE       : {}", twilio.api_base);
            }
            None => tracing::info!("  TWILIO                : (not configured, mock mode)"),
        }
        let masked: Vec<String> = self.alert_recipients.iter().map(|r| mask_number(r)).collect();
        tracing::info!("  ALERT_RECIPIENTS      : {:?}", masked);
        tracing::info!("  ALERT_COUNTRY_CODE    : {}", self.alert_country_code);
        tracing::info!("  NOTIFIER_TIMEOUT_SECS : {}", self.notifier_timeout_secs);
    }
}

/// Hide all but the last four characters of a phone number for logging.
pub fn mask_number(number: &str) -> String {
    // ---
    let digits = number.chars().count();
    if digits <= 4 {
        return "*".repeat(digits);
    }
    let tail: String = number.chars().skip(digits - 4).collect();
    format!("{}{}", "*".repeat(digits - 4), tail)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_parse_recipients() {
        // ---
        assert_eq!(
            parse_recipients("9937424848, +447700900123 ,,"),
            vec!["9937424848".to_string(), "+447700900123".to_string()]
        );
        assert!(parse_recipients("").is_empty());
        assert!(parse_recipients(" , ").is_empty());
    }

    #[test]
    fn test_mask_number() {
        // ---
        assert_eq!(mask_number("9937424848"), "******4848");
        assert_eq!(mask_number("123"), "***");
        assert_eq!(mask_number("+919937424848"), "*********4848");
        assert_eq!(mask_number(""), "");
    }
}
