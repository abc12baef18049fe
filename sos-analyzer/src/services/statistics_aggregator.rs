//! Statistics aggregation over clip outcomes
//!
//! A pure fold: every outcome counts towards `total_files`; only outcomes
//! with a positive finite mph speed count towards `processed_files` and the
//! min/max/mean. Never divides by zero.

use sos_common::units::round2;

use crate::models::{ClipOutcome, StatisticsSummary};

/// Summarize clip outcomes
pub fn summarize<'a, I>(outcomes: I) -> StatisticsSummary
where
    I: IntoIterator<Item = &'a ClipOutcome>,
{
    summarize_speeds(outcomes.into_iter().map(ClipOutcome::speed_mph))
}

/// Summarize raw mph values; `None`, non-finite and non-positive entries
/// count as failures
pub fn summarize_speeds<I>(speeds: I) -> StatisticsSummary
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut total = 0usize;
    let mut processed = 0usize;
    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for speed in speeds {
        total += 1;
        let Some(mph) = speed.filter(|v| v.is_finite() && *v > 0.0) else {
            continue;
        };
        processed += 1;
        sum += mph;
        min = min.min(mph);
        max = max.max(mph);
    }

    if processed == 0 {
        return StatisticsSummary {
            total_files: total,
            ..Default::default()
        };
    }

    StatisticsSummary {
        min_speed: round2(min),
        max_speed: round2(max),
        avg_speed: round2(sum / processed as f64),
        total_files: total,
        processed_files: processed,
    }
}
