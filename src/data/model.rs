use std::fmt;
use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Feature – one of the four plant readings
// ---------------------------------------------------------------------------

/// A single input column of the power-output model.
///
/// The declaration order is the column order everywhere: sliders, JSON
/// listings, attribution pairing and the force plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// Ambient temperature, °C.
    AmbientTemperature,
    /// Exhaust vacuum, cm Hg.
    ExhaustVacuum,
    /// Ambient pressure, mbar.
    AmbientPressure,
    /// Relative humidity, %.
    RelativeHumidity,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::AmbientTemperature,
        Feature::ExhaustVacuum,
        Feature::AmbientPressure,
        Feature::RelativeHumidity,
    ];

    /// Short column key used by the model (`AT`, `V`, `AP`, `RH`).
    pub fn key(self) -> &'static str {
        match self {
            Feature::AmbientTemperature => "AT",
            Feature::ExhaustVacuum => "V",
            Feature::AmbientPressure => "AP",
            Feature::RelativeHumidity => "RH",
        }
    }

    /// Slider caption.
    pub fn label(self) -> &'static str {
        match self {
            Feature::AmbientTemperature => "Ambient Temperature (AT)",
            Feature::ExhaustVacuum => "Exhaust Vacuum (V)",
            Feature::AmbientPressure => "Ambient Pressure (AP)",
            Feature::RelativeHumidity => "Relative Humidity (RH)",
        }
    }

    /// Closed range accepted for this reading.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Feature::AmbientTemperature => -10.0..=50.0,
            Feature::ExhaustVacuum => 25.0..=81.0,
            Feature::AmbientPressure => 990.0..=1030.0,
            Feature::RelativeHumidity => 10.0..=100.0,
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            Feature::AmbientTemperature => 25.0,
            Feature::ExhaustVacuum => 60.0,
            Feature::AmbientPressure => 1013.0,
            Feature::RelativeHumidity => 75.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Observation – the current slider values
// ---------------------------------------------------------------------------

/// One set of plant readings, always within each feature's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    values: [f64; 4],
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            values: Feature::ALL.map(Feature::default_value),
        }
    }
}

impl Observation {
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// Store a reading, clamped to the feature's range. NaN falls back to the default.
    pub fn set(&mut self, feature: Feature, value: f64) {
        let range = feature.range();
        self.values[feature.index()] = if value.is_nan() {
            feature.default_value()
        } else {
            value.clamp(*range.start(), *range.end())
        };
    }

    /// All readings in column order.
    pub fn entries(&self) -> [(Feature, f64); 4] {
        Feature::ALL.map(|f| (f, self.get(f)))
    }

    /// Readings for `features`, in the order given.
    pub fn select(&self, features: &[Feature]) -> Vec<(Feature, f64)> {
        features.iter().map(|&f| (f, self.get(f))).collect()
    }
}

impl Serialize for Observation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries())
    }
}
