//! Synthetic sensor readings for the `sensor-generator` binary.
//!
//! Realistic mode walks through weather patterns that persist for a few
//! readings each, so the service sees runs of related conditions rather
//! than white noise. Random mode samples each field uniformly.

use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Reading;

// ---

/// How readings are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMode {
    Realistic,
    Random,
}

impl FromStr for GeneratorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realistic" => Ok(Self::Realistic),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown mode '{other}', expected realistic or random")),
        }
    }
}

impl fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realistic => f.write_str("realistic"),
            Self::Random => f.write_str("random"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherPattern {
    Clear,
    Cloudy,
    Rainy,
    Storm,
    Cloudburst,
}

/// Value ranges a pattern draws from.
#[derive(Debug, Clone, Copy)]
pub struct PatternRanges {
    pub rainfall: (f64, f64),
    pub humidity: (f64, f64),
    pub pressure: (f64, f64),
    pub temperature: (f64, f64),
}

impl WeatherPattern {
    // ---
    pub const ALL: [Self; 5] = [
        Self::Clear,
        Self::Cloudy,
        Self::Rainy,
        Self::Storm,
        Self::Cloudburst,
    ];

    /// Relative likelihood of switching into this pattern.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Clear => 0.30,
            Self::Cloudy => 0.30,
            Self::Rainy => 0.25,
            Self::Storm => 0.10,
            Self::Cloudburst => 0.05,
        }
    }

    pub fn ranges(&self) -> PatternRanges {
        // ---
        match self {
            Self::Clear => PatternRanges {
                rainfall: (0.0, 5.0),
                humidity: (50.0, 70.0),
                pressure: (1010.0, 1025.0),
                temperature: (22.0, 30.0),
            },
            Self::Cloudy => PatternRanges {
                rainfall: (0.0, 10.0),
                humidity: (65.0, 80.0),
                pressure: (1005.0, 1015.0),
                temperature: (18.0, 26.0),
            },
            Self::Rainy => PatternRanges {
                rainfall: (5.0, 30.0),
                humidity: (75.0, 90.0),
                pressure: (995.0, 1010.0),
                temperature: (18.0, 26.0),
            },
            Self::Storm => PatternRanges {
                rainfall: (25.0, 60.0),
                humidity: (85.0, 95.0),
                pressure: (980.0, 1000.0),
                temperature: (15.0, 22.0),
            },
            Self::Cloudburst => PatternRanges {
                rainfall: (50.0, 100.0),
                humidity: (90.0, 100.0),
                pressure: (980.0, 995.0),
                temperature: (15.0, 22.0),
            },
        }
    }
}

/// Ranges used by [`GeneratorMode::Random`].
pub const RANDOM_RANGES: PatternRanges = PatternRanges {
    rainfall: (0.0, 100.0),
    humidity: (50.0, 100.0),
    pressure: (980.0, 1020.0),
    temperature: (15.0, 30.0),
};

/// Readings persist in one pattern for this many readings, inclusive.
const PATTERN_SPAN: (u32, u32) = (5, 15);

pub struct SensorGenerator<R = StdRng> {
    rng: R,
    pattern: WeatherPattern,
    elapsed: u32,
    span: u32,
}

impl SensorGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> SensorGenerator<R> {
    // ---
    pub fn with_rng(mut rng: R) -> Self {
        // ---
        let span = rng.gen_range(PATTERN_SPAN.0..=PATTERN_SPAN.1);
        Self {
            rng,
            pattern: WeatherPattern::Clear,
            elapsed: 0,
            span,
        }
    }

    pub fn pattern(&self) -> WeatherPattern {
        self.pattern
    }

    pub fn next_reading(&mut self, mode: GeneratorMode) -> Reading {
        // ---
        match mode {
            GeneratorMode::Realistic => {
                self.advance_pattern();
                let ranges = self.pattern.ranges();
                self.sample(&ranges)
            }
            GeneratorMode::Random => self.sample(&RANDOM_RANGES),
        }
    }

    fn advance_pattern(&mut self) {
        // ---
        self.elapsed += 1;
        if self.elapsed < self.span {
            return;
        }

        self.elapsed = 0;
        self.span = self.rng.gen_range(PATTERN_SPAN.0..=PATTERN_SPAN.1);

        let weights = WeatherPattern::ALL.map(|p| p.weight());
        if let Ok(dist) = WeightedIndex::new(weights) {
            self.pattern = WeatherPattern::ALL[dist.sample(&mut self.rng)];
            tracing::info!("Weather pattern changed to: {:?}", self.pattern);
        }
    }

    fn sample(&mut self, ranges: &PatternRanges) -> Reading {
        // ---
        Reading {
            rainfall: self.uniform(ranges.rainfall),
            humidity: self.uniform(ranges.humidity),
            temperature: self.uniform(ranges.temperature),
            pressure: self.uniform(ranges.pressure),
        }
    }

    fn uniform(&mut self, (low, high): (f64, f64)) -> f64 {
        round2(self.rng.gen_range(low..=high))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
