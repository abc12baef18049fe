//! Velocity estimation from impulse timing
//!
//! velocity_mps = distance_m / ((second_index - first_index) / sample_rate)
//!
//! Only the first two impulses (ascending index) are used; later impulses
//! such as reflections are ignored. Results are rounded to 2 decimals
//! after all arithmetic is done at full precision.

use sos_common::units::{mps_to_mph, round2};
use thiserror::Error;

use crate::models::{DistanceMeasurement, ImpulseSet, VelocityResult, Waveform};

/// Estimation outcomes other than a velocity
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimateError {
    /// Fewer than two impulses detected
    #[error("Not enough hits detected ({found} found, 2 required)")]
    InsufficientImpulses { found: usize },

    /// Second impulse does not come after the first
    #[error("Degenerate timing: impulses at samples {first} and {second}")]
    DegenerateTiming { first: usize, second: usize },
}

/// Estimate speed of sound for one clip
///
/// # Errors
/// * `InsufficientImpulses` - `impulses` holds fewer than two entries
/// * `DegenerateTiming` - time-of-flight is zero or negative
pub fn estimate(
    distance: &DistanceMeasurement,
    waveform: &Waveform,
    impulses: &ImpulseSet,
) -> Result<VelocityResult, EstimateError> {
    let (first, second) = impulses
        .first_pair()
        .ok_or(EstimateError::InsufficientImpulses {
            found: impulses.len(),
        })?;

    if second.index <= first.index {
        return Err(EstimateError::DegenerateTiming {
            first: first.index,
            second: second.index,
        });
    }

    let time_of_flight_s = (second.index - first.index) as f64 / waveform.sample_rate() as f64;
    let distance_m = distance.meters();
    let speed_mps = distance_m / time_of_flight_s;
    let speed_mph = mps_to_mph(speed_mps);

    tracing::debug!(
        first = first.index,
        second = second.index,
        time_of_flight_s = time_of_flight_s,
        distance_m = distance_m,
        speed_mps = speed_mps,
        "Velocity estimated"
    );

    Ok(VelocityResult {
        speed_mps: round2(speed_mps),
        speed_mph: round2(speed_mph),
        time_of_flight_s,
        distance_m,
        impulses: impulses.clone(),
        loud_samples: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_common::units::MPH_PER_MPS;
    use sos_common::DistanceUnit;

    fn waveform(sample_rate: u32) -> Waveform {
        Waveform::new(vec![0.0; 16], sample_rate).unwrap()
    }

    #[test]
    fn test_reference_scenario_64_inches() {
        let distance = DistanceMeasurement::new(64.0, DistanceUnit::Inches).unwrap();
        let impulses = ImpulseSet::from_indices(&[100, 200]);

        let result = estimate(&distance, &waveform(44100), &impulses).unwrap();

        assert!((result.time_of_flight_s - 100.0 / 44100.0).abs() < 1e-12);
        assert!((result.distance_m - 1.6256).abs() < 1e-12);

        let expected_mps = 1.6256 / (100.0 / 44100.0);
        assert_eq!(result.speed_mps, round2(expected_mps));
        assert_eq!(result.speed_mph, round2(expected_mps * MPH_PER_MPS));
        assert!((result.speed_mps - 716.89).abs() < 1e-9);
    }

    #[test]
    fn test_mph_uses_full_precision_mps() {
        let distance = DistanceMeasurement::new(1.0, DistanceUnit::Meters).unwrap();
        let impulses = ImpulseSet::from_indices(&[0, 3]);

        let result = estimate(&distance, &waveform(1000), &impulses).unwrap();
        let mps = 1.0 / 0.003;
        assert_eq!(result.speed_mph, round2(mps * MPH_PER_MPS));
    }

    #[test]
    fn test_only_first_two_impulses_used() {
        let distance = DistanceMeasurement::new(3.43, DistanceUnit::Meters).unwrap();
        let impulses = ImpulseSet::from_indices(&[1000, 1441, 1500, 9000]);

        let result = estimate(&distance, &waveform(44100), &impulses).unwrap();
        assert_eq!(result.speed_mps, round2(3.43 / (441.0 / 44100.0)));
        assert_eq!(result.impulses.len(), 4);
    }

    #[test]
    fn test_insufficient_impulses() {
        let distance = DistanceMeasurement::new(1.0, DistanceUnit::Meters).unwrap();

        assert_eq!(
            estimate(&distance, &waveform(44100), &ImpulseSet::default()),
            Err(EstimateError::InsufficientImpulses { found: 0 })
        );
        assert_eq!(
            estimate(&distance, &waveform(44100), &ImpulseSet::from_indices(&[500])),
            Err(EstimateError::InsufficientImpulses { found: 1 })
        );
    }

    #[test]
    fn test_same_index_is_degenerate() {
        let distance = DistanceMeasurement::new(1.0, DistanceUnit::Meters).unwrap();
        let impulses = ImpulseSet::from_indices(&[150, 150]);

        assert_eq!(
            estimate(&distance, &waveform(44100), &impulses),
            Err(EstimateError::DegenerateTiming {
                first: 150,
                second: 150
            })
        );
    }

    #[test]
    fn test_reversed_indices_are_degenerate() {
        let distance = DistanceMeasurement::new(1.0, DistanceUnit::Meters).unwrap();
        let impulses = ImpulseSet::from_indices(&[300, 200]);

        assert!(matches!(
            estimate(&distance, &waveform(44100), &impulses),
            Err(EstimateError::DegenerateTiming { .. })
        ));
    }
}
