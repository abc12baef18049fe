//! Analysis request/response data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sos_common::units::{MPH_LABEL, MPS_LABEL};

use super::outcome::ClipOutcome;
use super::statistics::StatisticsSummary;
use super::waveform::ImpulseSet;

/// Clip analysis request (POST /analyze, and each entry of POST /statistics)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Clip path relative to the root folder
    pub file_path: String,

    /// Distance between the two impulse sources
    pub distance: f64,

    /// Distance unit tag (default: meters)
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "meters".to_string()
}

/// Integer diagnostic entry (`{"value": n}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedValue {
    pub value: i64,
}

/// Clip analysis response
///
/// Failures keep the same shape with zeroed speeds and a status describing
/// what went wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Clip path as given in the request
    pub file_path: String,

    /// Status code (`ok`, `insufficient_impulses`, `degenerate_timing`,
    /// `not_found`, `decode_error`, `timed_out`, `rejected`)
    pub status: String,

    /// Human-readable status
    pub message: String,

    pub speed_mps: f64,
    pub speed_unit: String,
    pub speed_mph: f64,
    pub unit_mph: String,

    /// Seconds between the first two impulses (0 on failure)
    pub time_of_flight_s: f64,

    /// Distance normalized to meters (0 on failure)
    pub distance_m: f64,

    /// Impulse sample indices
    pub peaks: Vec<IndexedValue>,

    /// Amplitude samples at or above the loudness floor
    pub amplitude_formatted: Vec<IndexedValue>,

    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResponse {
    /// Build response for a clip outcome
    pub fn from_outcome(file_path: impl Into<String>, outcome: &ClipOutcome) -> Self {
        let mut response = Self {
            file_path: file_path.into(),
            status: outcome.status().to_string(),
            message: outcome.message(),
            speed_mps: 0.0,
            speed_unit: MPS_LABEL.to_string(),
            speed_mph: 0.0,
            unit_mph: MPH_LABEL.to_string(),
            time_of_flight_s: 0.0,
            distance_m: 0.0,
            peaks: Vec::new(),
            amplitude_formatted: Vec::new(),
            analyzed_at: Utc::now(),
        };

        match outcome {
            ClipOutcome::Estimated(result) => {
                response.speed_mps = result.speed_mps;
                response.speed_mph = result.speed_mph;
                response.time_of_flight_s = result.time_of_flight_s;
                response.distance_m = result.distance_m;
                response.peaks = format_peaks(&result.impulses);
                response.amplitude_formatted = format_amplitudes(&result.loud_samples);
            }
            ClipOutcome::InsufficientImpulses(detection)
            | ClipOutcome::DegenerateTiming(detection) => {
                response.peaks = format_peaks(&detection.impulses);
                response.amplitude_formatted = format_amplitudes(&detection.loud_samples);
            }
            ClipOutcome::LoadFailed(_) | ClipOutcome::Rejected(_) => {}
        }

        response
    }
}

fn format_peaks(impulses: &ImpulseSet) -> Vec<IndexedValue> {
    impulses
        .iter()
        .map(|i| IndexedValue {
            value: i.index as i64,
        })
        .collect()
}

fn format_amplitudes(samples: &[f32]) -> Vec<IndexedValue> {
    samples
        .iter()
        .map(|&a| IndexedValue { value: a as i64 })
        .collect()
}

/// Batch statistics request (POST /statistics)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsRequest {
    pub clips: Vec<AnalysisRequest>,
}

/// Batch statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    /// Per-clip results in request order
    pub audio_statistics: Vec<AnalysisResponse>,

    #[serde(flatten)]
    pub summary: StatisticsSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Detection, VelocityResult};
    use crate::services::LoadError;
    use std::path::PathBuf;

    #[test]
    fn test_request_default_unit() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"file_path": "a.wav", "distance": 2.0}"#).unwrap();
        assert_eq!(request.unit, "meters");
    }

    #[test]
    fn test_success_response_shape() {
        let outcome = ClipOutcome::Estimated(VelocityResult {
            speed_mps: 716.89,
            speed_mph: 1603.64,
            time_of_flight_s: 100.0 / 44100.0,
            distance_m: 1.6256,
            impulses: ImpulseSet::from_indices(&[100, 200]),
            loud_samples: vec![15000.0, 20000.7],
        });

        let response = AnalysisResponse::from_outcome("clip.wav", &outcome);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["speed_unit"], "m/s");
        assert_eq!(json["unit_mph"], "MPH");
        assert_eq!(json["speed_mps"], 716.89);
        assert_eq!(json["peaks"], serde_json::json!([{"value": 100}, {"value": 200}]));
        assert_eq!(
            json["amplitude_formatted"],
            serde_json::json!([{"value": 15000}, {"value": 20000}])
        );
    }

    #[test]
    fn test_insufficient_response_is_zeroed() {
        let detection = Detection {
            impulses: ImpulseSet::from_indices(&[1234]),
            loud_samples: Vec::new(),
            threshold: 1.0,
        };
        let response =
            AnalysisResponse::from_outcome("one_hit.wav", &ClipOutcome::InsufficientImpulses(detection));

        assert_eq!(response.status, "insufficient_impulses");
        assert_eq!(response.message, "Not enough hits detected");
        assert_eq!(response.speed_mps, 0.0);
        assert_eq!(response.speed_mph, 0.0);
        assert_eq!(response.peaks, vec![IndexedValue { value: 1234 }]);
    }

    #[test]
    fn test_load_failure_response_is_empty() {
        let outcome = ClipOutcome::LoadFailed(LoadError::AssetNotFound(PathBuf::from("gone.wav")));
        let response = AnalysisResponse::from_outcome("gone.wav", &outcome);

        assert_eq!(response.status, "not_found");
        assert!(response.peaks.is_empty());
        assert!(response.amplitude_formatted.is_empty());
        assert_eq!(response.speed_mph, 0.0);
    }

    #[test]
    fn test_statistics_response_flattens_summary() {
        let response = StatisticsResponse {
            audio_statistics: Vec::new(),
            summary: StatisticsSummary::default(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total_files"], 0);
        assert_eq!(json["min_speed"], 0.0);
        assert!(json["audio_statistics"].as_array().unwrap().is_empty());
    }
}
