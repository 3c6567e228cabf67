//! Progress accounting for the detail phase
//!
//! Tracks a monotone completed-count and derives an estimated time
//! remaining from elapsed wall-clock time, recomputed after every
//! completion.

use std::time::{Duration, Instant};

/// A point-in-time view of the run's progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    /// Completed fraction as a percentage (0.0 to 100.0)
    pub percent: f64,
    pub elapsed: Duration,
    /// `elapsed / completed * total - elapsed`; `None` until the first
    /// completion lands
    pub eta: Option<Duration>,
}

/// Tracks completions against a fixed task total.
#[derive(Debug)]
pub struct ProgressTracker {
    started: Instant,
    total: usize,
    completed: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            started: Instant::now(),
            total,
            completed: 0,
        }
    }

    /// Record one completed task and return the updated snapshot.
    pub fn complete_one(&mut self) -> ProgressSnapshot {
        self.completed += 1;
        self.snapshot()
    }

    /// Current snapshot without recording a completion.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let elapsed = self.started.elapsed();
        let percent = if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        };
        let eta = (self.completed > 0).then(|| {
            let per_task = elapsed.as_secs_f64() / self.completed as f64;
            let remaining = per_task * self.total as f64 - elapsed.as_secs_f64();
            Duration::from_secs_f64(remaining.max(0.0))
        });

        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            percent,
            elapsed,
            eta,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Render a duration as `2h 3m 4s`, omitting leading zero units.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h ", hours));
    }
    if minutes > 0 || hours > 0 {
        out.push_str(&format!("{}m ", minutes));
    }
    out.push_str(&format!("{}s", seconds));
    out
}
