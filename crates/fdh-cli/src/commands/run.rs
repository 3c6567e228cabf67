//! `fdh run` - both harvest phases back to back

use crate::error::Result;
use crate::observer::ConsoleListObserver;
use colored::Colorize;
use fdh_scrape::config::ScrapeConfig;
use fdh_scrape::fetch::HttpFetcher;
use fdh_scrape::list::{harvest_list, ShardPlan};
use std::sync::Arc;
use std::time::Instant;

pub async fn run(max_pages: Option<u32>, sharded: bool, concurrency: Option<usize>) -> Result<()> {
    let mut config = ScrapeConfig::from_env()?;
    config.max_pages = max_pages;
    if let Some(concurrency) = concurrency {
        config.concurrency = concurrency;
    }

    let plan = if sharded {
        ShardPlan::alphabet()
    } else {
        ShardPlan::Flat
    };

    println!("{}", "Starting full harvest (list + details)...".magenta());
    let started = Instant::now();
    let fetcher = Arc::new(HttpFetcher::new(config.clone())?);

    let outcome = harvest_list(fetcher.as_ref(), &plan, &config, &ConsoleListObserver).await?;
    super::list::report(&outcome, started);

    if outcome.unique.is_empty() {
        return Ok(());
    }

    let detail_started = Instant::now();
    super::details::run_phase(fetcher, outcome.unique, &config, detail_started).await
}
