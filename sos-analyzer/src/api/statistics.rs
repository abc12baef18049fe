//! Batch statistics API handler
//!
//! POST /statistics

use axum::{extract::State, routing::post, Json, Router};

use crate::{
    api::resolve_clip_path,
    error::ApiResult,
    models::{
        AnalysisRequest, AnalysisResponse, ClipOutcome, DistanceMeasurement, StatisticsRequest,
        StatisticsResponse,
    },
    services::{summarize, ClipJob},
    AppState,
};

/// POST /statistics
///
/// Analyze every listed clip and summarize speeds. Per-clip problems,
/// including invalid entries and missing files, show up as zeroed entries
/// and never fail the whole request.
pub async fn clip_statistics(
    State(state): State<AppState>,
    Json(request): Json<StatisticsRequest>,
) -> ApiResult<Json<StatisticsResponse>> {
    tracing::info!(clips = request.clips.len(), "Statistics request");

    // Invalid entries are settled up front; the rest go to the batch runner
    let mut outcomes: Vec<Option<ClipOutcome>> = Vec::with_capacity(request.clips.len());
    let mut jobs = Vec::new();
    for clip in &request.clips {
        match prepare_job(&state, clip) {
            Ok(job) => {
                jobs.push(job);
                outcomes.push(None);
            }
            Err(reason) => outcomes.push(Some(ClipOutcome::Rejected(reason))),
        }
    }

    let mut analyzed = state.analyzer.analyze_batch(jobs).await.into_iter();
    let outcomes: Vec<ClipOutcome> = outcomes
        .into_iter()
        .map(|slot| match slot {
            Some(rejected) => rejected,
            None => analyzed
                .next()
                .unwrap_or_else(|| ClipOutcome::Rejected("clip was not analyzed".to_string())),
        })
        .collect();

    if let Some(fault) = outcomes.iter().rev().find_map(ClipOutcome::service_fault) {
        state.record_error(fault.to_string()).await;
    }

    let summary = summarize(&outcomes);
    tracing::info!("{}", summary.display_string());

    let audio_statistics = request
        .clips
        .iter()
        .zip(&outcomes)
        .map(|(clip, outcome)| AnalysisResponse::from_outcome(clip.file_path.clone(), outcome))
        .collect();

    Ok(Json(StatisticsResponse {
        audio_statistics,
        summary,
    }))
}

fn prepare_job(state: &AppState, clip: &AnalysisRequest) -> Result<ClipJob, String> {
    let path = resolve_clip_path(&state.root_folder, &clip.file_path).map_err(|e| e.to_string())?;
    let distance =
        DistanceMeasurement::from_tag(clip.distance, &clip.unit).map_err(|e| e.to_string())?;
    Ok(ClipJob { path, distance })
}

/// Build statistics routes
pub fn statistics_routes() -> Router<AppState> {
    Router::new().route("/statistics", post(clip_statistics))
}
