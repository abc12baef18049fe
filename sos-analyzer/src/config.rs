//! Configuration for sos-analyzer
//!
//! Bootstrap settings from the TOML file, overridable from the command line
//! and environment (see `main.rs`). A missing file gives built-in defaults.

use serde::Deserialize;
use sos_common::config::{default_config_path, load_toml_config, LoggingConfig};
use sos_common::{Error, Result};
use std::path::{Path, PathBuf};

use crate::models::{BatchParameters, DetectionParameters};
use crate::services::{ClipAnalyzer, ImpulseDetector};

/// Module name, used for the config file name
pub const MODULE_NAME: &str = "sos-analyzer";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5780;

/// TOML configuration
///
/// ```toml
/// root_folder = "/srv/clips"
/// port = 5780
///
/// [logging]
/// level = "info"
///
/// [analysis]
/// loudness_floor = 15000.0
/// percentile = 95.0
/// min_separation_samples = 5000
///
/// [batch]
/// parallelism = 4
/// decode_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub analysis: DetectionParameters,

    #[serde(default)]
    pub batch: BatchParameters,
}

impl AnalyzerConfig {
    /// Load from `path`, or the platform default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_toml_config(path),
            None => match default_config_path(MODULE_NAME) {
                Some(path) => load_toml_config(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Build the clip analyzer, validating detection parameters
    pub fn build_analyzer(&self) -> Result<ClipAnalyzer> {
        let detector = ImpulseDetector::new(self.analysis)
            .map_err(|e| Error::Config(format!("[analysis] {}", e)))?;

        if self.batch.parallelism == 0 {
            return Err(Error::Config(
                "[batch] parallelism must be at least 1".to_string(),
            ));
        }
        if self.batch.decode_timeout_ms == 0 {
            return Err(Error::Config(
                "[batch] decode_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(ClipAnalyzer::new(detector, self.batch))
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}
