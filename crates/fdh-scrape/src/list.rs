//! List-phase orchestration
//!
//! Drives a [`ListSource`] across a flat page sequence or a fixed shard
//! key-space, extracts and accumulates records in discovery order, persists
//! per-page batches plus the full and deduplicated collections, and reports
//! progress through the observer.

use crate::config::ScrapeConfig;
use crate::dedupe::dedupe;
use crate::error::Result;
use crate::extract::extract_profiles;
use crate::fetch::ListSource;
use crate::observer::{HarvestObserver, PageEvent};
use crate::records::{ListRow, ProfileRecord};
use crate::sink::{list_files, ResultsDir};
use tracing::{error, info, warn};

/// How the listing query space is partitioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardPlan {
    /// A single unsharded page sequence.
    Flat,
    /// One nested page loop per key, keys exhausted in order.
    Keyed(Vec<char>),
}

impl ShardPlan {
    /// The standard alphabet key-space (`searchString` a..z).
    pub fn alphabet() -> Self {
        ShardPlan::Keyed(('a'..='z').collect())
    }

    fn keys(&self) -> Vec<Option<char>> {
        match self {
            ShardPlan::Flat => vec![None],
            ShardPlan::Keyed(keys) => keys.iter().copied().map(Some).collect(),
        }
    }
}

/// Summary of a completed list phase.
#[derive(Debug)]
pub struct ListOutcome {
    /// Deduplicated records, discovery order
    pub unique: Vec<ProfileRecord>,
    /// Records accumulated before dedup
    pub total_records: usize,
    /// Non-empty pages fetched across all shards
    pub pages_fetched: u32,
    /// Shards aborted after retry exhaustion, with the escalated error
    pub aborted_shards: Vec<(Option<char>, crate::error::ScrapeError)>,
}

/// Run the list phase to exhaustion.
///
/// Each shard stops at its first empty page (normal termination) or when a
/// page fetch exhausts its retries (the shard aborts; other shards and the
/// accumulated records survive). `config.max_pages` caps pages per shard;
/// `None` runs to natural termination.
pub async fn harvest_list(
    source: &dyn ListSource,
    plan: &ShardPlan,
    config: &ScrapeConfig,
    observer: &dyn HarvestObserver,
) -> Result<ListOutcome> {
    let sink = ResultsDir::create(&config.list_dir)?;
    let mut all: Vec<ProfileRecord> = Vec::new();
    let mut pages_fetched = 0u32;
    let mut aborted_shards = Vec::new();

    for shard in plan.keys() {
        let mut page = 1u32;
        loop {
            if let Some(max) = config.max_pages {
                if page > max {
                    info!(?shard, max, "Reached page cap for shard");
                    break;
                }
            }

            let html = match source.fetch_page(shard, page).await {
                Ok(html) => html,
                Err(err) => {
                    error!(?shard, page, error = %err, "Aborting shard after retry exhaustion");
                    aborted_shards.push((shard, err));
                    break;
                }
            };

            let records = extract_profiles(&html);
            if records.is_empty() {
                info!(?shard, page, "Empty page, shard exhausted");
                break;
            }

            pages_fetched += 1;
            sink.write_json(&list_files::page(shard, page, "json"), &records)?;
            let rows: Vec<ListRow> = records.iter().map(ListRow::from).collect();
            sink.write_csv(&list_files::page(shard, page, "csv"), &rows)?;

            let count = records.len();
            all.extend(records);
            info!(?shard, page, count, total = all.len(), "Fetched page");
            observer.on_page(&PageEvent {
                shard,
                page,
                count,
                total: all.len(),
                response_bytes: html.len(),
            });

            page += 1;
        }
    }

    let total_records = all.len();
    if total_records == 0 {
        warn!("No records were harvested; the site structure may have changed");
        return Ok(ListOutcome {
            unique: Vec::new(),
            total_records: 0,
            pages_fetched,
            aborted_shards,
        });
    }

    // Partial results from healthy shards are persisted even when some
    // shards aborted.
    sink.write_json(list_files::ALL_JSON, &all)?;
    let rows: Vec<ListRow> = all.iter().map(ListRow::from).collect();
    sink.write_csv(list_files::ALL_CSV, &rows)?;

    let unique = dedupe(all);
    info!(
        total = total_records,
        unique = unique.len(),
        "Deduplicated harvested records"
    );

    sink.write_json(list_files::UNIQUE_JSON, &unique)?;
    let unique_rows: Vec<ListRow> = unique.iter().map(ListRow::from).collect();
    sink.write_csv(list_files::UNIQUE_CSV, &unique_rows)?;

    Ok(ListOutcome {
        unique,
        total_records,
        pages_fetched,
        aborted_shards,
    })
}
