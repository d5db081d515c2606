//! Search statistics collection and reporting.

use std::time::Duration;

use crate::run::{RunKind, RunOutcome};

/// Statistics for one search over a body's path space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Number of replays of the body.
    pub run_count: u64,
    /// Runs that produced a value.
    pub solution_count: u64,
    /// Runs that failed.
    pub failure_count: u64,
    /// Choice points passed across all runs.
    pub choice_point_count: u64,
    /// Failed runs caused by an out-of-range replayed index.
    pub stale_path_count: u64,
    /// Longest count list discovered by any run.
    pub max_depth: usize,
    /// Wall-clock time spent searching.
    pub duration: Duration,
    /// True if a termination limit stopped the search before the path
    /// space was exhausted.
    pub terminated_early: bool,
}

impl SearchStatistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished run.
    pub fn record_run<T>(&mut self, outcome: &RunOutcome<T>, choice_points: u64) {
        self.run_count += 1;
        self.choice_point_count += choice_points;
        self.max_depth = self.max_depth.max(outcome.counts().len());
        match outcome.kind() {
            RunKind::Success => self.solution_count += 1,
            RunKind::Failure => self.failure_count += 1,
        }
        if outcome.stale().is_some() {
            self.stale_path_count += 1;
        }
    }

    /// Returns the fraction of runs that produced a value.
    pub fn success_rate(&self) -> f64 {
        if self.run_count == 0 {
            0.0
        } else {
            self.solution_count as f64 / self.run_count as f64
        }
    }

    /// Returns the average time per run.
    pub fn avg_time_per_run(&self) -> Duration {
        if self.run_count == 0 {
            Duration::ZERO
        } else {
            self.duration.div_f64(self.run_count as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::ChoiceCounts;

    #[test]
    fn test_record_runs() {
        let mut stats = SearchStatistics::new();
        stats.record_run(
            &RunOutcome::Success {
                value: 1,
                counts: ChoiceCounts::from(vec![3, 3]),
            },
            2,
        );
        stats.record_run(
            &RunOutcome::<i32>::Failure {
                counts: ChoiceCounts::from(vec![3]),
                stale: None,
            },
            0,
        );

        assert_eq!(stats.run_count, 2);
        assert_eq!(stats.solution_count, 1);
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.choice_point_count, 2);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.stale_path_count, 0);
        assert!((stats.success_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = SearchStatistics::new();

        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.avg_time_per_run(), Duration::ZERO);
        assert!(!stats.terminated_early);
    }
}
