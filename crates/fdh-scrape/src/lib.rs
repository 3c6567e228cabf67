//! FDH Scrape Library
//!
//! Ingestion pipeline for a paginated, HTML-rendered directory of
//! professional profiles:
//!
//! - **List phase**: paginated (or alphabet-sharded) acquisition with
//!   bounded retry, empty-page termination, extraction, deduplication, and
//!   JSON/CSV persistence of every page plus the full and unique
//!   collections.
//! - **Detail phase**: per-identity detail pages fetched under a fixed
//!   concurrency ceiling with per-task retry, immediate per-identity
//!   checkpointing, progress/ETA accounting, and issue-order consolidated
//!   output.
//!
//! # Example
//!
//! ```no_run
//! use fdh_scrape::config::ScrapeConfig;
//! use fdh_scrape::fetch::HttpFetcher;
//! use fdh_scrape::list::{harvest_list, ShardPlan};
//! use fdh_scrape::observer::NoopObserver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScrapeConfig::from_env()?;
//!     let fetcher = HttpFetcher::new(config.clone())?;
//!     let outcome =
//!         harvest_list(&fetcher, &ShardPlan::Flat, &config, &NoopObserver).await?;
//!     println!("{} unique profiles", outcome.unique.len());
//!     Ok(())
//! }
//! ```

pub mod backoff;
pub mod config;
pub mod dedupe;
pub mod detail;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod list;
pub mod observer;
pub mod progress;
pub mod records;
pub mod sink;

// Re-export commonly used types
pub use error::{FetchScope, Result, ScrapeError};
pub use records::{DetailRecord, EnrichedRecord, ProfileRecord};
