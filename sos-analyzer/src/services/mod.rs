//! Analysis services for sos-analyzer
//!
//! Leaf-first: loader → detector → estimator, composed per clip by the
//! clip analyzer; the aggregator folds many clip outcomes.

pub mod clip_analyzer;
pub mod impulse_detector;
pub mod statistics_aggregator;
pub mod velocity_estimator;
pub mod waveform_loader;

pub use clip_analyzer::{clip_span, ClipAnalyzer, ClipJob};
pub use impulse_detector::{DetectorError, ImpulseDetector};
pub use statistics_aggregator::{summarize, summarize_speeds};
pub use velocity_estimator::{estimate, EstimateError};
pub use waveform_loader::{load_waveform, LoadError};
