//! Progress tracking shared by worker threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Lock-free job counters.
#[derive(Debug)]
pub struct ProgressTracker {
    total: u64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    started: Instant,
}

impl ProgressTracker {
    /// Track `total` jobs starting now.
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Record one finished job.
    pub fn record(&self, success: bool) {
        let counter = if success {
            &self.succeeded
        } else {
            &self.failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of the counters.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress(&self) -> Progress {
        Progress {
            total: self.total,
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            elapsed_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

/// Progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Jobs submitted.
    pub total: u64,
    /// Jobs that produced a report.
    pub succeeded: u64,
    /// Jobs that failed.
    pub failed: u64,
    /// Milliseconds since tracking began.
    pub elapsed_ms: u64,
}

impl Progress {
    /// Finished jobs.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.succeeded + self.failed
    }

    /// Completion percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed() as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::new(10);

        tracker.record(true);
        tracker.record(true);
        tracker.record(false);

        let progress = tracker.progress();
        assert_eq!(progress.total, 10);
        assert_eq!(progress.completed(), 3);
        assert_eq!(progress.failed, 1);
        assert!((progress.percentage() - 30.0).abs() < 0.1);
    }

    #[test]
    fn test_empty_tracker_is_complete() {
        assert_eq!(ProgressTracker::new(0).progress().percentage(), 100.0);
    }
}
