//! Console and progress-bar observers for harvest checkpoints

use colored::Colorize;
use fdh_scrape::observer::{DetailEvent, HarvestObserver, PageEvent};
use fdh_scrape::progress::format_duration;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints one colored line per harvested listing page.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleListObserver;

impl HarvestObserver for ConsoleListObserver {
    fn on_page(&self, event: &PageEvent) {
        let shard = event
            .shard
            .map(|key| format!(" [shard {key}]"))
            .unwrap_or_default();
        let line = format!(
            "Page {}{}: {} profiles (total {}, {:.2} KB)",
            event.page,
            shard,
            event.count,
            event.total,
            event.response_bytes as f64 / 1024.0
        );
        println!("{}", line.cyan());
    }
}

/// Drives an indicatif bar from detail-phase completions.
pub struct DetailProgressObserver {
    bar: ProgressBar,
}

impl DetailProgressObserver {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl HarvestObserver for DetailProgressObserver {
    fn on_detail(&self, event: &DetailEvent<'_>) {
        self.bar.set_position(event.progress.completed as u64);
        let eta = event
            .progress
            .eta
            .map(format_duration)
            .unwrap_or_else(|| "?".to_string());
        let mark = if event.ok {
            "✓".green()
        } else {
            "✗".red()
        };
        self.bar
            .set_message(format!("{} {} (ETA {})", mark, event.name, eta));
    }
}
