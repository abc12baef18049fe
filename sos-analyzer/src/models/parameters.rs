//! Detection and batch processing parameters

use serde::{Deserialize, Serialize};

/// Impulse detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionParameters {
    /// Absolute amplitude floor for loud-sample diagnostics, on a 16-bit
    /// scale (default: 15000)
    #[serde(default = "default_loudness_floor")]
    pub loudness_floor: f32,

    /// Percentile of the amplitude series used as the adaptive peak
    /// threshold (default: 95)
    #[serde(default = "default_percentile")]
    pub percentile: f64,

    /// Minimum gap between accepted impulses in samples (default: 5000)
    #[serde(default = "default_min_separation_samples")]
    pub min_separation_samples: usize,
}

/// Batch processing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchParameters {
    /// Number of clips analyzed concurrently (default: 4)
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Per-clip decode and analysis timeout in milliseconds (default: 30000)
    #[serde(default = "default_decode_timeout_ms")]
    pub decode_timeout_ms: u64,
}

fn default_loudness_floor() -> f32 {
    15000.0
}

fn default_percentile() -> f64 {
    95.0
}

fn default_min_separation_samples() -> usize {
    5000
}

fn default_parallelism() -> usize {
    4
}

fn default_decode_timeout_ms() -> u64 {
    30_000
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            loudness_floor: default_loudness_floor(),
            percentile: default_percentile(),
            min_separation_samples: default_min_separation_samples(),
        }
    }
}

impl Default for BatchParameters {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            decode_timeout_ms: default_decode_timeout_ms(),
        }
    }
}
