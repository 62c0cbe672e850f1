//! Threshold classification of a single reading.

use crate::{Reading, Status};

// ---

/// Rainfall above this (mm/hr) is a cloudburst on its own.
pub const CLOUDBURST_RAINFALL: f64 = 50.0;

/// Inclusive lower bound (mm/hr) of the warning band.
pub const WARNING_RAINFALL: f64 = 20.0;

/// Humidity above this (%) counts toward a cloudburst when pressure is low.
pub const SATURATED_HUMIDITY: f64 = 85.0;

/// Pressure below this (hPa) counts toward a cloudburst when humidity is high.
pub const LOW_PRESSURE: f64 = 1000.0;

/// Map a reading to its safety status.
///
/// Rules, first match wins:
/// 1. `rainfall > 50` or (`humidity > 85` and `pressure < 1000`) -> cloudburst
/// 2. `20 <= rainfall <= 50` -> warning
/// 3. otherwise -> safe
///
/// Temperature is never consulted. NaN fails every comparison and therefore
/// falls through to `safe` unless another field triggers a rule.
pub fn classify(reading: &Reading) -> Status {
    // ---
    let saturated_low = reading.humidity > SATURATED_HUMIDITY && reading.pressure < LOW_PRESSURE;

    if reading.rainfall > CLOUDBURST_RAINFALL || saturated_low {
        Status::CloudburstDetected
    } else if (WARNING_RAINFALL..=CLOUDBURST_RAINFALL).contains(&reading.rainfall) {
        Status::Warning
    } else {
        Status::Safe
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn reading(rainfall: f64, humidity: f64, temperature: f64, pressure: f64) -> Reading {
        // ---
        Reading {
            rainfall,
            humidity,
            temperature,
            pressure,
        }
    }

    #[test]
    fn test_scenarios() {
        // ---
        assert_eq!(classify(&reading(10.0, 60.0, 25.0, 1015.0)), Status::Safe);
        assert_eq!(classify(&reading(30.0, 70.0, 22.0, 1010.0)), Status::Warning);
        assert_eq!(
            classify(&reading(60.0, 80.0, 20.0, 1005.0)),
            Status::CloudburstDetected
        );
        assert_eq!(
            classify(&reading(15.0, 90.0, 18.0, 995.0)),
            Status::CloudburstDetected
        );
        assert_eq!(classify(&reading(25.0, 85.0, 20.0, 1005.0)), Status::Warning);
        assert_eq!(classify(&reading(0.0, 50.0, 30.0, 1020.0)), Status::Safe);
    }

    #[test]
    fn test_heavy_rain_ignores_humidity_and_pressure() {
        // ---
        for (humidity, pressure) in [(0.0, 1013.0), (100.0, 950.0), (50.0, 1040.0)] {
            assert_eq!(
                classify(&reading(80.0, humidity, 20.0, pressure)),
                Status::CloudburstDetected
            );
        }
    }

    #[test]
    fn test_rainfall_boundaries() {
        // ---
        let at_upper = Reading {
            rainfall: 50.0,
            pressure: 1013.0,
            ..Reading::default()
        };
        assert_eq!(classify(&at_upper), Status::Warning);

        let above_upper = Reading {
            rainfall: 50.01,
            ..Reading::default()
        };
        assert_eq!(classify(&above_upper), Status::CloudburstDetected);

        let at_lower = Reading {
            rainfall: 20.0,
            ..Reading::default()
        };
        assert_eq!(classify(&at_lower), Status::Warning);

        let below_lower = Reading {
            rainfall: 19.99,
            ..Reading::default()
        };
        assert_eq!(classify(&below_lower), Status::Safe);
    }

    #[test]
    fn test_humidity_and_pressure_are_strict() {
        // ---
        // Humidity exactly 85 does not qualify, so rainfall decides
        assert_eq!(classify(&reading(0.0, 85.0, 20.0, 999.0)), Status::Safe);
        assert_eq!(classify(&reading(30.0, 85.0, 20.0, 999.0)), Status::Warning);

        // Pressure exactly 1000 does not qualify
        assert_eq!(classify(&reading(0.0, 95.0, 20.0, 1000.0)), Status::Safe);

        assert_eq!(
            classify(&reading(0.0, 85.01, 20.0, 999.99)),
            Status::CloudburstDetected
        );
    }

    #[test]
    fn test_temperature_is_ignored() {
        // ---
        for temperature in [-40.0, 0.0, 55.0] {
            assert_eq!(classify(&reading(10.0, 60.0, temperature, 1015.0)), Status::Safe);
        }
    }

    #[test]
    fn test_defaults_are_safe() {
        // ---
        assert_eq!(classify(&Reading::default()), Status::Safe);
    }

    #[test]
    fn test_nan_falls_through() {
        // ---
        assert_eq!(classify(&reading(f64::NAN, 60.0, 20.0, 1015.0)), Status::Safe);
        assert_eq!(
            classify(&reading(f64::NAN, 90.0, 20.0, 990.0)),
            Status::CloudburstDetected
        );
        assert_eq!(classify(&reading(30.0, f64::NAN, 20.0, 990.0)), Status::Warning);
    }
}
