//! sos-analyzer library interface
//!
//! Speed-of-sound estimation from two-impulse audio clips, plus the HTTP
//! surface that exposes it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::services::ClipAnalyzer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Clip analysis pipeline
    pub analyzer: ClipAnalyzer,
    /// Folder that request file paths are resolved against
    pub root_folder: PathBuf,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(analyzer: ClipAnalyzer, root_folder: PathBuf) -> Self {
        Self {
            analyzer,
            root_folder,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember an error for the health endpoint
    pub async fn record_error(&self, message: String) {
        *self.last_error.write().await = Some(message);
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::analysis_routes())
        .merge(api::statistics_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
