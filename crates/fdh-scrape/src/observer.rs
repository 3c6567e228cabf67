//! Checkpoint observer for harvest progress
//!
//! Orchestrators report progress at defined checkpoints (per listing page,
//! per completed detail task) through an injected observer rather than a
//! free-running background timer. The CLI installs console/progress-bar
//! implementations; library callers default to [`NoopObserver`].

use crate::progress::ProgressSnapshot;

/// Emitted after each non-empty listing page is extracted and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEvent {
    /// Shard key, `None` in flat mode
    pub shard: Option<char>,
    /// 1-based page index within the shard
    pub page: u32,
    /// Records extracted from this page
    pub count: usize,
    /// Records accumulated so far across all shards
    pub total: usize,
    /// Raw response size in bytes
    pub response_bytes: usize,
}

/// Emitted after each detail task settles (success or recorded failure).
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEvent<'a> {
    pub id: &'a str,
    pub name: &'a str,
    /// `false` when the task exhausted its retries
    pub ok: bool,
    pub progress: ProgressSnapshot,
}

/// Observer invoked by the orchestrators at checkpoints.
///
/// Implementations must be cheap and non-blocking; they run on the
/// orchestrator's completion path.
pub trait HarvestObserver: Send + Sync {
    fn on_page(&self, _event: &PageEvent) {}
    fn on_detail(&self, _event: &DetailEvent<'_>) {}
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl HarvestObserver for NoopObserver {}
