//! Error types for the harvest pipeline
//!
//! Every fetch failure carries its scope (page or identity) and the attempt
//! count so a failed run can be diagnosed without re-running.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// What a fetch was trying to retrieve when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    /// One page of the listing, optionally within a shard key.
    Page { shard: Option<char>, page: u32 },
    /// The detail document for one identity.
    Detail { id: String },
}

impl std::fmt::Display for FetchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchScope::Page { shard: Some(key), page } => {
                write!(f, "list page {} (shard '{}')", page, key)
            }
            FetchScope::Page { shard: None, page } => write!(f, "list page {}", page),
            FetchScope::Detail { id } => write!(f, "detail page for id '{}'", id),
        }
    }
}

/// Error type for the harvest pipeline
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport-level HTTP failure (network error or non-success status)
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A fetch failed on every attempt up to the configured bound
    #[error("Fetch of {scope} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        scope: FetchScope,
        attempts: u32,
        #[source]
        source: Box<ScrapeError>,
    },

    /// File system operation failed
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing failed
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The unique-list input file for the detail phase is missing
    #[error("Input file not found: '{0}'. Run the list phase first to produce it.")]
    MissingInput(PathBuf),
}

impl ScrapeError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap the last transport error after the retry bound was reached
    pub fn retries_exhausted(scope: FetchScope, attempts: u32, source: ScrapeError) -> Self {
        Self::RetriesExhausted {
            scope,
            attempts,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_scope_display() {
        let flat = FetchScope::Page { shard: None, page: 3 };
        assert_eq!(flat.to_string(), "list page 3");

        let sharded = FetchScope::Page { shard: Some('k'), page: 2 };
        assert_eq!(sharded.to_string(), "list page 2 (shard 'k')");

        let detail = FetchScope::Detail { id: "abc".to_string() };
        assert_eq!(detail.to_string(), "detail page for id 'abc'");
    }

    #[test]
    fn test_retries_exhausted_message_carries_context() {
        let inner = ScrapeError::config("connection refused");
        let err = ScrapeError::retries_exhausted(
            FetchScope::Detail { id: "abc".to_string() },
            3,
            inner,
        );
        let message = err.to_string();
        assert!(message.contains("detail page for id 'abc'"));
        assert!(message.contains("3 attempts"));
    }
}
