//! `fdh list` - harvest the profile listing

use crate::error::Result;
use crate::observer::ConsoleListObserver;
use colored::Colorize;
use fdh_scrape::config::ScrapeConfig;
use fdh_scrape::fetch::HttpFetcher;
use fdh_scrape::list::{harvest_list, ListOutcome, ShardPlan};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

pub struct ListArgs {
    pub max_pages: Option<u32>,
    pub sharded: bool,
    pub output: Option<PathBuf>,
    pub page_size: Option<u32>,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let mut config = ScrapeConfig::from_env()?;
    config.max_pages = args.max_pages;
    if let Some(dir) = args.output {
        config.list_dir = dir;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    let plan = if args.sharded {
        ShardPlan::alphabet()
    } else {
        ShardPlan::Flat
    };

    match config.max_pages {
        Some(max) => println!("{}", format!("Starting harvest, max pages: {max}").magenta()),
        None => println!("{}", "Starting harvest for all profiles...".magenta()),
    }

    let started = Instant::now();
    let fetcher = HttpFetcher::new(config.clone())?;
    let outcome = harvest_list(&fetcher, &plan, &config, &ConsoleListObserver).await?;
    report(&outcome, started);

    Ok(())
}

pub(crate) fn report(outcome: &ListOutcome, started: Instant) {
    if outcome.total_records == 0 {
        println!(
            "{}",
            "No profiles were harvested. Check whether the site structure has changed."
                .yellow()
        );
        return;
    }

    for (shard, err) in &outcome.aborted_shards {
        let label = shard.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{}", format!("Shard {label} aborted: {err}").red());
    }

    info!(
        pages = outcome.pages_fetched,
        total = outcome.total_records,
        unique = outcome.unique.len(),
        "List phase finished"
    );
    println!("{}", "\nHarvest completed successfully!".green().bold());
    println!(
        "{}",
        format!(
            "Total unique profiles: {} (from {} records, {} pages)",
            outcome.unique.len(),
            outcome.total_records,
            outcome.pages_fetched
        )
        .cyan()
    );
    println!(
        "{}",
        format!("Time taken: {:.2} seconds", started.elapsed().as_secs_f64()).cyan()
    );
}
