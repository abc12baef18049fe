//! Impulse detection
//!
//! Locates the dominant acoustic impulses in a waveform:
//! 1. Rectify samples to an amplitude series
//! 2. Adaptive threshold = configured percentile of the amplitude series
//! 3. Local maxima at or above the threshold, each at least
//!    `min_separation_samples` after the previously accepted one
//! 4. Separately, every amplitude at or above the fixed loudness floor
//!
//! The percentile threshold keeps detection independent of recording level;
//! the loudness floor is diagnostic only.

use thiserror::Error;

use crate::models::{DetectionParameters, Detection, Impulse, ImpulseSet, Waveform};

/// Impulse detector configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum DetectorError {
    #[error("Invalid percentile: {0} (must be within 0..=100)")]
    InvalidPercentile(f64),

    #[error("Invalid minimum separation: must be at least 1 sample")]
    InvalidSeparation,

    #[error("Invalid loudness floor: {0} (must be a positive number)")]
    InvalidLoudnessFloor(f32),
}

/// Impulse detector
#[derive(Debug, Clone)]
pub struct ImpulseDetector {
    params: DetectionParameters,
}

impl ImpulseDetector {
    /// Create detector, validating parameters
    pub fn new(params: DetectionParameters) -> Result<Self, DetectorError> {
        if !(0.0..=100.0).contains(&params.percentile) {
            return Err(DetectorError::InvalidPercentile(params.percentile));
        }
        if params.min_separation_samples == 0 {
            return Err(DetectorError::InvalidSeparation);
        }
        if !params.loudness_floor.is_finite() || params.loudness_floor <= 0.0 {
            return Err(DetectorError::InvalidLoudnessFloor(params.loudness_floor));
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &DetectionParameters {
        &self.params
    }

    /// Detect impulses and loud samples
    ///
    /// Never fails: an empty or silent waveform yields an empty detection.
    pub fn detect(&self, waveform: &Waveform) -> Detection {
        let amplitude: Vec<f32> = waveform.samples().iter().map(|s| s.abs()).collect();
        if amplitude.is_empty() {
            return Detection::default();
        }

        let threshold = percentile(&amplitude, self.params.percentile);

        let mut accepted: Vec<Impulse> = Vec::new();
        for index in local_maxima(&amplitude) {
            if amplitude[index] < threshold {
                continue;
            }
            let far_enough = accepted
                .last()
                .map_or(true, |prev| index - prev.index >= self.params.min_separation_samples);
            if far_enough {
                accepted.push(Impulse {
                    index,
                    amplitude: amplitude[index],
                });
            }
        }

        let loud_samples: Vec<f32> = amplitude
            .iter()
            .copied()
            .filter(|&a| a >= self.params.loudness_floor)
            .collect();

        tracing::debug!(
            threshold = threshold,
            impulses = accepted.len(),
            loud_samples = loud_samples.len(),
            "Impulse detection complete"
        );

        Detection {
            impulses: ImpulseSet::new(accepted),
            loud_samples,
            threshold,
        }
    }
}

impl Default for ImpulseDetector {
    fn default() -> Self {
        Self {
            params: DetectionParameters::default(),
        }
    }
}

/// Percentile with linear interpolation between closest ranks
///
/// `values` must be non-empty; `pct` is clamped to `0..=100`.
pub fn percentile(values: &[f32], pct: f64) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = (rank - lower as f64) as f32;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Indices of local maxima, in ascending order
///
/// A maximum rises strictly from its left neighbour and is followed
/// (after any plateau) by a strictly lower sample. Plateaus report their
/// first sample. The first and last samples never qualify.
pub fn local_maxima(values: &[f32]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if values.len() < 3 {
        return maxima;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push(i);
            }
            i = ahead;
        } else {
            i += 1;
        }
    }

    maxima
}
