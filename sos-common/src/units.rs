//! Distance and speed unit conversion
//!
//! Single conversion table shared by the velocity estimator and any caller
//! that needs to present a speed or distance in another unit.
//!
//! Two entry points exist for every conversion:
//! - Typed: methods on [`DistanceUnit`], which cannot fail
//! - Lenient: free functions taking a unit tag string. An unrecognized tag
//!   returns the input value unchanged and logs a warning.

/// Meters in one inch
pub const METERS_PER_INCH: f64 = 0.0254;

/// Meters in one centimeter
pub const METERS_PER_CENTIMETER: f64 = 0.01;

/// Miles per hour in one meter per second (fixed reporting constant)
pub const MPH_PER_MPS: f64 = 2.23694;

/// Label reported alongside speeds in meters per second
pub const MPS_LABEL: &str = "m/s";

/// Label reported alongside speeds in miles per hour
pub const MPH_LABEL: &str = "MPH";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Supported linear distance units
///
/// Request tags are mapped with [`DistanceUnit::parse`], which accepts the
/// usual aliases case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    Inches,
    Meters,
    Centimeters,
}

impl DistanceUnit {
    /// Meters in one unit
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Inches => METERS_PER_INCH,
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Centimeters => METERS_PER_CENTIMETER,
        }
    }

    /// Statute miles in one unit
    ///
    /// These are the fixed constants of the legacy speed conversion path;
    /// they agree with [`MPH_PER_MPS`] to five significant digits.
    pub fn miles_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Inches => 0.0000157828283,
            DistanceUnit::Meters => 0.000621371,
            DistanceUnit::Centimeters => 0.00000621371,
        }
    }

    /// Normalize a distance in this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Express a distance in meters in this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    /// Convert a speed in this unit per second to miles per hour
    pub fn speed_to_mph(&self, speed_per_second: f64) -> f64 {
        speed_per_second * self.miles_per_unit() * SECONDS_PER_HOUR
    }

    /// Parse a unit tag (case-insensitive, common aliases accepted)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => Some(DistanceUnit::Inches),
            "meters" | "meter" | "metres" | "metre" | "m" => Some(DistanceUnit::Meters),
            "centimeters" | "centimeter" | "centimetres" | "centimetre" | "cm" => {
                Some(DistanceUnit::Centimeters)
            }
            _ => None,
        }
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Inches => "inches",
            DistanceUnit::Meters => "meters",
            DistanceUnit::Centimeters => "centimeters",
        }
    }

    /// Get all supported units
    pub fn all_variants() -> &'static [DistanceUnit] {
        &[
            DistanceUnit::Inches,
            DistanceUnit::Meters,
            DistanceUnit::Centimeters,
        ]
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a speed in meters per second to miles per hour
pub fn mps_to_mph(speed_mps: f64) -> f64 {
    speed_mps * MPH_PER_MPS
}

/// Convert a speed in `source_unit` per second to miles per hour
///
/// Unrecognized units return `speed` unchanged.
pub fn to_mph(speed: f64, source_unit: &str) -> f64 {
    match DistanceUnit::parse(source_unit) {
        Some(unit) => unit.speed_to_mph(speed),
        None => {
            warn_unrecognized(source_unit);
            speed
        }
    }
}

/// Normalize a distance to meters
///
/// Unrecognized units return `value` unchanged.
pub fn to_meters(value: f64, unit: &str) -> f64 {
    match DistanceUnit::parse(unit) {
        Some(unit) => unit.to_meters(value),
        None => {
            warn_unrecognized(unit);
            value
        }
    }
}

/// Express a distance in meters in `unit`
///
/// Unrecognized units return `meters` unchanged.
pub fn from_meters(meters: f64, unit: &str) -> f64 {
    match DistanceUnit::parse(unit) {
        Some(unit) => unit.from_meters(meters),
        None => {
            warn_unrecognized(unit);
            meters
        }
    }
}

/// Round to two decimal places for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn warn_unrecognized(unit: &str) {
    tracing::warn!(unit = unit, "Unrecognized unit, value passed through unchanged");
}
