//! Per-clip analysis pipeline and batch runner
//!
//! Pipeline per clip: load → detect → estimate, ending in a [`ClipOutcome`].
//!
//! Each clip runs inside its own `tracing` span, created by the caller and
//! passed in explicitly so that logs from the blocking pool stay attributed
//! to the clip and to the request that asked for it.
//!
//! Batches run on the blocking pool with bounded parallelism and a per-clip
//! timeout. A clip that fails, times out or panics becomes a `LoadFailed`
//! outcome; its siblings are unaffected.
//!
//! Decodes hold a slot from a shared semaphore until the blocking work
//! really ends. A timed-out decode keeps its slot while it runs on, so the
//! number of live decodes never exceeds `parallelism`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tracing::Span;

use crate::models::{BatchParameters, ClipOutcome, DistanceMeasurement, Waveform};
use crate::services::impulse_detector::ImpulseDetector;
use crate::services::velocity_estimator;
use crate::services::waveform_loader::{load_waveform, LoadError};

/// One clip to analyze
#[derive(Debug, Clone)]
pub struct ClipJob {
    /// Resolved path of the audio asset
    pub path: PathBuf,
    pub distance: DistanceMeasurement,
}

/// Create the tracing span for one clip
pub fn clip_span(path: &Path) -> Span {
    tracing::info_span!("clip", file = %path.display())
}

/// Clip analyzer
///
/// Clones share the same decode slots.
#[derive(Debug, Clone)]
pub struct ClipAnalyzer {
    detector: ImpulseDetector,
    batch: BatchParameters,
    decode_slots: Arc<Semaphore>,
}

impl ClipAnalyzer {
    pub fn new(detector: ImpulseDetector, batch: BatchParameters) -> Self {
        Self {
            detector,
            batch,
            decode_slots: Arc::new(Semaphore::new(batch.parallelism.max(1))),
        }
    }

    /// Decodes currently running on the blocking pool, including timed-out
    /// ones that have not finished yet
    pub fn active_decodes(&self) -> usize {
        self.batch.parallelism.max(1) - self.decode_slots.available_permits()
    }

    pub fn detector(&self) -> &ImpulseDetector {
        &self.detector
    }

    pub fn batch_params(&self) -> &BatchParameters {
        &self.batch
    }

    /// Detect and estimate on an already loaded waveform
    pub fn analyze_waveform(
        &self,
        span: &Span,
        waveform: &Waveform,
        distance: &DistanceMeasurement,
    ) -> ClipOutcome {
        let _enter = span.enter();

        let detection = self.detector.detect(waveform);
        let result = velocity_estimator::estimate(distance, waveform, &detection.impulses);
        let outcome = ClipOutcome::from_estimate(result, detection);

        match &outcome {
            ClipOutcome::Estimated(result) => tracing::info!(
                speed_mps = result.speed_mps,
                speed_mph = result.speed_mph,
                "Clip analyzed"
            ),
            other => tracing::warn!(status = other.status(), "{}", other.message()),
        }

        outcome
    }

    /// Run the full pipeline on a file (blocking)
    pub fn analyze_file(
        &self,
        span: &Span,
        path: &Path,
        distance: &DistanceMeasurement,
    ) -> ClipOutcome {
        let loaded = {
            let _enter = span.enter();
            load_waveform(path).map_err(|e| {
                tracing::warn!(error = %e, "Clip could not be loaded");
                e
            })
        };

        match loaded {
            Ok(waveform) => self.analyze_waveform(span, &waveform, distance),
            Err(e) => ClipOutcome::LoadFailed(e),
        }
    }

    /// Run the full pipeline on the blocking pool with the configured timeout
    ///
    /// Waits for a free decode slot first; the timeout starts once the
    /// decode is spawned. On timeout the outcome is reported immediately.
    /// The blocking decode itself cannot be interrupted, so it finishes in
    /// the background and releases its slot only then.
    pub async fn analyze_clip(&self, job: ClipJob) -> ClipOutcome {
        let span = clip_span(&job.path);
        let timeout = Duration::from_millis(self.batch.decode_timeout_ms);
        let path = job.path.clone();

        let permit = match self.decode_slots.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!(parent: &span, error = %e, "Decode slots unavailable");
                return ClipOutcome::LoadFailed(LoadError::DecodeError {
                    path,
                    reason: format!("decode slots unavailable: {}", e),
                });
            }
        };

        let analyzer = self.clone();
        let task = tokio::task::spawn_blocking({
            let span = span.clone();
            move || {
                let _permit = permit;
                analyzer.analyze_file(&span, &job.path, &job.distance)
            }
        });

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => {
                tracing::error!(parent: &span, error = %join_error, "Analysis worker failed");
                ClipOutcome::LoadFailed(LoadError::DecodeError {
                    path,
                    reason: format!("analysis worker failed: {}", join_error),
                })
            }
            Err(_) => {
                tracing::warn!(
                    parent: &span,
                    timeout_ms = self.batch.decode_timeout_ms,
                    "Clip analysis timed out"
                );
                ClipOutcome::LoadFailed(LoadError::TimedOut { path, timeout })
            }
        }
    }

    /// Analyze many clips concurrently; outcomes are returned in input order
    pub async fn analyze_batch(&self, jobs: Vec<ClipJob>) -> Vec<ClipOutcome> {
        let total = jobs.len();
        let parallelism = self.batch.parallelism.max(1);

        tracing::info!(clips = total, workers = parallelism, "Starting batch analysis");

        let mut indexed: Vec<(usize, ClipOutcome)> = stream::iter(jobs.into_iter().enumerate())
            .map(|(index, job)| async move { (index, self.analyze_clip(job).await) })
            .buffer_unordered(parallelism)
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);

        let outcomes: Vec<ClipOutcome> = indexed.into_iter().map(|(_, outcome)| outcome).collect();
        let successful = outcomes.iter().filter(|o| o.is_success()).count();

        tracing::info!(
            total,
            successful,
            failed = total - successful,
            "Batch analysis completed"
        );

        outcomes
    }
}

impl Default for ClipAnalyzer {
    fn default() -> Self {
        Self::new(ImpulseDetector::default(), BatchParameters::default())
    }
}
