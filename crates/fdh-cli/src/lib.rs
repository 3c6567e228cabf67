//! FDH CLI Library
//!
//! Command-line interface for the profile directory harvester:
//!
//! - **List phase**: harvest the paginated listing (`fdh list`)
//! - **Detail phase**: enrich harvested profiles (`fdh details`)
//! - **Both**: run the phases back to back (`fdh run`)

pub mod commands;
pub mod error;
pub mod observer;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FDH - Profile Directory Harvester
#[derive(Parser, Debug)]
#[command(name = "fdh")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Harvest the profile listing
    List {
        /// Maximum pages per shard; omit to run to natural termination
        max_pages: Option<u32>,

        /// Iterate the alphabet key-space instead of a flat page sequence
        #[arg(long)]
        sharded: bool,

        /// Output directory for list artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Records requested per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Enrich harvested profiles with their detail pages
    Details {
        /// Unique-list JSON file produced by the list phase
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for detail artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Concurrency ceiling for detail fetches
        #[arg(short, long)]
        concurrency: Option<usize>,
    },

    /// Run the list and detail phases back to back
    Run {
        /// Maximum pages per shard; omit to run to natural termination
        max_pages: Option<u32>,

        /// Iterate the alphabet key-space instead of a flat page sequence
        #[arg(long)]
        sharded: bool,

        /// Concurrency ceiling for detail fetches
        #[arg(short, long)]
        concurrency: Option<usize>,
    },
}
