//! GET /health

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::config::MODULE_NAME;
use crate::models::DetectionParameters;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the root folder is missing
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub root_folder: String,
    /// Active detection settings
    pub detection: DetectionParameters,
    pub batch_workers: usize,
    /// Most recent clip that failed to decode or timed out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    let status = if state.root_folder.is_dir() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        module: MODULE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        root_folder: state.root_folder.display().to_string(),
        detection: *state.analyzer.detector().params(),
        batch_workers: state.analyzer.batch_params().parallelism,
        last_error: state.last_error.read().await.clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
