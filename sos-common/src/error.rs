//! Shared error type for sos crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Bootstrap configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Distance is zero, negative, NaN or infinite
    #[error("Distance must be a positive finite number, got {0}")]
    InvalidDistance(f64),
}
