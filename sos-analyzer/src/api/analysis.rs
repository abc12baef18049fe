//! Clip analysis API handler
//!
//! POST /analyze

use axum::{extract::State, routing::post, Json, Router};

use crate::{
    api::resolve_clip_path,
    error::{ApiError, ApiResult},
    models::{AnalysisRequest, AnalysisResponse, ClipOutcome, DistanceMeasurement},
    services::{ClipJob, LoadError},
    AppState,
};

/// POST /analyze
///
/// Analyze a single clip. Analysis failures (too few hits, corrupt audio)
/// return 200 with a zeroed result and a status; only a clip that cannot be
/// found at all is a 404.
pub async fn analyze_clip(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Json<AnalysisResponse>> {
    tracing::info!(
        file_path = %request.file_path,
        distance = request.distance,
        unit = %request.unit,
        "Analysis request"
    );

    let path = resolve_clip_path(&state.root_folder, &request.file_path)?;
    let distance = DistanceMeasurement::from_tag(request.distance, &request.unit)?;

    let outcome = state
        .analyzer
        .analyze_clip(ClipJob { path, distance })
        .await;

    if let ClipOutcome::LoadFailed(LoadError::AssetNotFound(_)) = &outcome {
        return Err(ApiError::ClipNotFound(request.file_path));
    }
    if let Some(fault) = outcome.service_fault() {
        state.record_error(fault.to_string()).await;
    }

    Ok(Json(AnalysisResponse::from_outcome(request.file_path, &outcome)))
}

/// Build clip analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze_clip))
}
