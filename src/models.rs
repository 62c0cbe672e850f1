//! Simple data models for the cloudburst pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::IngestError;

// ---

/// Standard atmospheric pressure at sea level, in hPa.
pub const STANDARD_PRESSURE_HPA: f64 = 1013.25;

/// Standard atmosphere sea-level temperature, in degrees Celsius.
pub const STANDARD_TEMPERATURE_C: f64 = 15.0;

/// One weather sample as submitted by a sensor.
///
/// All four fields are required on the wire. [`Default`] supplies the
/// values the classifier assumes for absent measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    // ---
    /// Rainfall in mm/hr.
    pub rainfall: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Temperature in degrees Celsius. Informational only.
    pub temperature: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            rainfall: 0.0,
            humidity: 0.0,
            temperature: STANDARD_TEMPERATURE_C,
            pressure: STANDARD_PRESSURE_HPA,
        }
    }
}

impl Reading {
    // ---
    /// Parse a JSON request body into a reading.
    ///
    /// Only the shape is checked: every field must be present and numeric.
    /// Values are not range-checked.
    pub fn from_json(body: &[u8]) -> Result<Self, IngestError> {
        // ---
        serde_json::from_slice(body).map_err(|e| IngestError::InvalidInput(e.to_string()))
    }
}

/// Safety classification of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Safe,
    Warning,
    CloudburstDetected,
}

impl Status {
    // ---
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::CloudburstDetected => "cloudburst_detected",
        }
    }

    /// Whether this status is handed to the notifier at all.
    pub const fn is_alert(&self) -> bool {
        !matches!(self, Self::Safe)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reading after classification, as held by the history store and
/// returned by `/sensor-data` and `/latest-readings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    // ---
    pub timestamp: DateTime<Utc>,
    pub status: Status,
    #[serde(rename = "data")]
    pub reading: Reading,
}
