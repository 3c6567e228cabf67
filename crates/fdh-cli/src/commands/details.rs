//! `fdh details` - enrich harvested profiles with their detail pages

use crate::error::Result;
use crate::observer::DetailProgressObserver;
use colored::Colorize;
use fdh_scrape::config::ScrapeConfig;
use fdh_scrape::detail::enrich_details;
use fdh_scrape::fetch::HttpFetcher;
use fdh_scrape::records::{EnrichedRecord, ProfileRecord};
use fdh_scrape::sink::{self, list_files};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub struct DetailsArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub concurrency: Option<usize>,
}

pub async fn run(args: DetailsArgs) -> Result<()> {
    let mut config = ScrapeConfig::from_env()?;
    if let Some(dir) = args.output {
        config.details_dir = dir;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    let input = args
        .input
        .unwrap_or_else(|| config.list_dir.join(list_files::UNIQUE_JSON));

    println!("{}", "Starting detail harvester...".cyan());
    let profiles = sink::load_profiles(&input)?;
    println!(
        "{}",
        format!("Loaded {} profiles from {}", profiles.len(), input.display()).yellow()
    );

    let started = Instant::now();
    let fetcher = Arc::new(HttpFetcher::new(config.clone())?);
    run_phase(fetcher, profiles, &config, started).await
}

pub(crate) async fn run_phase(
    fetcher: Arc<HttpFetcher>,
    profiles: Vec<ProfileRecord>,
    config: &ScrapeConfig,
    started: Instant,
) -> Result<()> {
    let observer = DetailProgressObserver::new(profiles.len() as u64);
    let results = enrich_details(fetcher, profiles, config, &observer).await?;
    observer.finish();

    report(&results, started);
    Ok(())
}

fn report(results: &[EnrichedRecord], started: Instant) {
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!(total = results.len(), failed, "Detail phase finished");

    println!("{}", "\nDetail harvest completed!".green().bold());
    println!(
        "{}",
        format!("Profiles processed: {} ({} failed)", results.len(), failed).cyan()
    );
    println!(
        "{}",
        format!("Time taken: {:.2} seconds", started.elapsed().as_secs_f64()).cyan()
    );
}
