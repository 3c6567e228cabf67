//! FDH CLI - Main entry point

use clap::Parser;
use fdh_cli::commands::{details, list, run};
use fdh_cli::{Cli, Commands};
use fdh_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("fdh".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("fdh".to_string())
            .build()
    };

    // Environment variables take precedence over flag-derived defaults
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // The CLI still works without logging
    let _ = init_logging(&log_config);

    let result = execute_command(cli).await;

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> fdh_cli::Result<()> {
    match cli.command {
        Commands::List {
            max_pages,
            sharded,
            output,
            page_size,
        } => {
            list::run(list::ListArgs {
                max_pages,
                sharded,
                output,
                page_size,
            })
            .await
        }

        Commands::Details {
            input,
            output,
            concurrency,
        } => {
            details::run(details::DetailsArgs {
                input,
                output,
                concurrency,
            })
            .await
        }

        Commands::Run {
            max_pages,
            sharded,
            concurrency,
        } => run::run(max_pages, sharded, concurrency).await,
    }
}
