//! Aggregate statistics over many clips

use serde::{Deserialize, Serialize};

/// Min/max/mean of successfully processed clip speeds (mph)
///
/// All values are zero when nothing was processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub min_speed: f64,
    pub max_speed: f64,
    pub avg_speed: f64,
    pub total_files: usize,
    pub processed_files: usize,
}

impl StatisticsSummary {
    pub fn failed_files(&self) -> usize {
        self.total_files.saturating_sub(self.processed_files)
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} of {} files processed ({} failed), speed {:.2}..{:.2} MPH (mean {:.2})",
            self.processed_files,
            self.total_files,
            self.failed_files(),
            self.min_speed,
            self.max_speed,
            self.avg_speed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_files_never_underflows() {
        let summary = StatisticsSummary {
            total_files: 1,
            processed_files: 3,
            ..Default::default()
        };
        assert_eq!(summary.failed_files(), 0);
    }

    #[test]
    fn test_display_string() {
        let summary = StatisticsSummary {
            min_speed: 760.56,
            max_speed: 767.27,
            avg_speed: 763.92,
            total_files: 5,
            processed_files: 2,
        };
        assert_eq!(
            summary.display_string(),
            "2 of 5 files processed (3 failed), speed 760.56..767.27 MPH (mean 763.92)"
        );
    }
}
