//! Distance and velocity value types

use sos_common::DistanceUnit;
use sos_common::{Error, Result};

use super::waveform::ImpulseSet;

/// Physical distance between the two impulse sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceMeasurement {
    value: f64,
    unit: DistanceUnit,
}

impl DistanceMeasurement {
    /// Create a measurement; the value must be finite and positive
    pub fn new(value: f64, unit: DistanceUnit) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidDistance(value));
        }
        Ok(Self { value, unit })
    }

    /// Create a measurement from a unit tag
    ///
    /// An unrecognized tag falls back to a factor of 1 (the value is taken
    /// as meters) and a warning is logged.
    pub fn from_tag(value: f64, unit_tag: &str) -> Result<Self> {
        let unit = DistanceUnit::parse(unit_tag).unwrap_or_else(|| {
            tracing::warn!(
                unit = unit_tag,
                "Unrecognized distance unit, treating value as meters"
            );
            DistanceUnit::Meters
        });
        Self::new(value, unit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Distance normalized to meters
    pub fn meters(&self) -> f64 {
        self.unit.to_meters(self.value)
    }
}

/// Successful velocity estimate for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityResult {
    /// Speed in meters per second, rounded to 2 decimals
    pub speed_mps: f64,
    /// Speed in miles per hour, rounded to 2 decimals
    pub speed_mph: f64,
    /// Seconds between the first two impulses
    pub time_of_flight_s: f64,
    /// Distance normalized to meters
    pub distance_m: f64,
    /// Impulses found in the clip (only the first two are used)
    pub impulses: ImpulseSet,
    /// Amplitude samples at or above the loudness floor
    pub loud_samples: Vec<f32>,
}

impl VelocityResult {
    /// Attach loud-sample diagnostics
    pub fn with_loud_samples(mut self, loud_samples: Vec<f32>) -> Self {
        self.loud_samples = loud_samples;
        self
    }
}
