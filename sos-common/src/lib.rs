//! # SOS Common Library
//!
//! Shared code for the speed-of-sound analyzer including:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Distance and speed unit conversion table

pub mod config;
pub mod error;
pub mod units;

pub use error::{Error, Result};
pub use units::DistanceUnit;
