//! Backoff policies for retrying failed fetches
//!
//! Every policy is monotonically non-decreasing in the attempt number.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay policy applied between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "millis")]
pub enum BackoffPolicy {
    /// The same delay after every failed attempt.
    Fixed(u64),
    /// `base * attempt`, growing linearly with the attempt number.
    Linear(u64),
    /// `base * 2^(attempt - 1)`, doubling with each attempt.
    Exponential(u64),
}

impl BackoffPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1) as u64;
        let millis = match *self {
            BackoffPolicy::Fixed(base) => base,
            BackoffPolicy::Linear(base) => base.saturating_mul(attempt),
            BackoffPolicy::Exponential(base) => {
                base.saturating_mul(1u64 << (attempt - 1).min(32))
            }
        };
        Duration::from_millis(millis)
    }
}
