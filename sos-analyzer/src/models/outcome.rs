//! Per-clip terminal outcome
//!
//! Every clip analysis ends in exactly one of these states:
//! `Loaded → Detected → {Estimated | InsufficientImpulses | DegenerateTiming}`,
//! or `LoadFailed` / `Rejected` before any audio is examined.

use crate::services::{EstimateError, LoadError};

use super::velocity::VelocityResult;
use super::waveform::Detection;

/// Outcome of analyzing one clip
#[derive(Debug, Clone, PartialEq)]
pub enum ClipOutcome {
    /// Velocity computed
    Estimated(VelocityResult),

    /// Fewer than two impulses detected
    InsufficientImpulses(Detection),

    /// Impulses did not yield a positive time-of-flight
    DegenerateTiming(Detection),

    /// Asset missing, undecodable or timed out
    LoadFailed(LoadError),

    /// Request input was invalid (bad path or distance)
    Rejected(String),
}

impl ClipOutcome {
    /// Fold an estimator result into an outcome
    pub fn from_estimate(
        result: Result<VelocityResult, EstimateError>,
        detection: Detection,
    ) -> Self {
        match result {
            Ok(velocity) => ClipOutcome::Estimated(velocity.with_loud_samples(detection.loud_samples)),
            Err(EstimateError::InsufficientImpulses { .. }) => {
                ClipOutcome::InsufficientImpulses(detection)
            }
            Err(EstimateError::DegenerateTiming { .. }) => ClipOutcome::DegenerateTiming(detection),
        }
    }

    /// Speed in mph when the outcome carries a usable one
    ///
    /// Non-finite and non-positive speeds count as failures.
    pub fn speed_mph(&self) -> Option<f64> {
        match self {
            ClipOutcome::Estimated(result)
                if result.speed_mph.is_finite() && result.speed_mph > 0.0 =>
            {
                Some(result.speed_mph)
            }
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.speed_mph().is_some()
    }

    /// Decode failure or timeout, the failures reported on /health
    ///
    /// A missing asset is a client mistake, not a service fault.
    pub fn service_fault(&self) -> Option<&LoadError> {
        match self {
            ClipOutcome::LoadFailed(LoadError::AssetNotFound(_)) => None,
            ClipOutcome::LoadFailed(e) => Some(e),
            _ => None,
        }
    }

    /// Machine-readable status code
    pub fn status(&self) -> &'static str {
        match self {
            ClipOutcome::Estimated(_) => "ok",
            ClipOutcome::InsufficientImpulses(_) => "insufficient_impulses",
            ClipOutcome::DegenerateTiming(_) => "degenerate_timing",
            ClipOutcome::LoadFailed(LoadError::AssetNotFound(_)) => "not_found",
            ClipOutcome::LoadFailed(LoadError::TimedOut { .. }) => "timed_out",
            ClipOutcome::LoadFailed(LoadError::DecodeError { .. }) => "decode_error",
            ClipOutcome::Rejected(_) => "rejected",
        }
    }

    /// Human-readable status text
    pub fn message(&self) -> String {
        match self {
            ClipOutcome::Estimated(_) => "Speed of sound estimated".to_string(),
            ClipOutcome::InsufficientImpulses(_) => "Not enough hits detected".to_string(),
            ClipOutcome::DegenerateTiming(_) => {
                "Detected hits do not give a positive time of flight".to_string()
            }
            ClipOutcome::LoadFailed(e) => e.to_string(),
            ClipOutcome::Rejected(reason) => reason.clone(),
        }
    }
}
