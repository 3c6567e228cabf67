//! Detail-phase orchestration
//!
//! Runs one detail fetch per identity under a fixed concurrency ceiling.
//! The pool stays saturated: as soon as one task settles the next pending
//! identity starts. Completions funnel through the single consumer loop,
//! which owns the progress counter and the result sequence, checkpoints
//! every record to disk the moment it settles, and finally writes the
//! consolidated artifacts in issue order.

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::fetch::DetailSource;
use crate::observer::{DetailEvent, HarvestObserver};
use crate::progress::ProgressTracker;
use crate::records::{DetailRow, EnrichedRecord, ProfileRecord};
use crate::sink::{detail_files, ResultsDir};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, warn};

/// Enrich every profile with its detail record.
///
/// One failed identity never aborts the run: after retry exhaustion the
/// record is kept with `scraped_details: None` and a diagnostic `error`,
/// checkpointed like any success. A crash loses at most the in-flight
/// batch; every settled identity is already on disk.
pub async fn enrich_details(
    source: Arc<dyn DetailSource>,
    profiles: Vec<ProfileRecord>,
    config: &ScrapeConfig,
    observer: &dyn HarvestObserver,
) -> Result<Vec<EnrichedRecord>> {
    let sink = ResultsDir::create(&config.details_dir)?;
    let total = profiles.len();
    let concurrency = config.concurrency.max(1);
    info!(total, concurrency, "Starting detail phase");

    let mut tracker = ProgressTracker::new(total);
    let mut settled = futures::stream::iter(profiles.into_iter().enumerate().map(
        |(index, profile)| {
            let source = Arc::clone(&source);
            async move {
                let outcome = source.fetch_detail(&profile.id).await;
                (index, profile, outcome)
            }
        },
    ))
    .buffer_unordered(concurrency);

    // Issue-order slots; per-identity files land in completion order.
    let mut slots: Vec<Option<EnrichedRecord>> = (0..total).map(|_| None).collect();

    while let Some((index, profile, outcome)) = settled.next().await {
        let record = match outcome {
            Ok(details) => EnrichedRecord {
                profile,
                scraped_details: Some(details),
                error: None,
            },
            Err(err) => {
                warn!(id = %profile.id, error = %err, "Recording failed identity");
                EnrichedRecord {
                    profile,
                    scraped_details: None,
                    error: Some(err.to_string()),
                }
            }
        };

        // Checkpoint before anything else so a crash cannot lose a settled
        // identity.
        sink.write_json(
            &detail_files::identity(&record.profile.id, "json"),
            std::slice::from_ref(&record),
        )?;
        let row = DetailRow::from(&record);
        sink.write_csv(
            &detail_files::identity(&record.profile.id, "csv"),
            std::slice::from_ref(&row),
        )?;

        let snapshot = tracker.complete_one();
        observer.on_detail(&DetailEvent {
            id: &record.profile.id,
            name: &record.profile.name,
            ok: record.error.is_none(),
            progress: snapshot,
        });

        slots[index] = Some(record);
    }

    let results: Vec<EnrichedRecord> = slots.into_iter().flatten().collect();
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!(total = results.len(), failed, "Detail phase settled");

    sink.write_json(detail_files::ALL_JSON, &results)?;
    let rows: Vec<DetailRow> = results.iter().map(DetailRow::from).collect();
    sink.write_csv(detail_files::ALL_CSV, &rows)?;

    Ok(results)
}
