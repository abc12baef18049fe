//! Data models for sos-analyzer

pub mod analysis;
pub mod outcome;
pub mod parameters;
pub mod statistics;
pub mod velocity;
pub mod waveform;

pub use analysis::{
    AnalysisRequest, AnalysisResponse, IndexedValue, StatisticsRequest, StatisticsResponse,
};
pub use outcome::ClipOutcome;
pub use parameters::{BatchParameters, DetectionParameters};
pub use statistics::StatisticsSummary;
pub use velocity::{DistanceMeasurement, VelocityResult};
pub use waveform::{Detection, Impulse, ImpulseSet, Waveform, FULL_SCALE_16BIT};
