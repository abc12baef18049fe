//! Test Helper Utilities
//!
//! Shared utilities for testing sos-analyzer

pub mod audio_generator;

pub use audio_generator::{generate_click_wav, ClipConfig};
