//! Error types shared across the FDH workspace

use thiserror::Error;

/// Result type alias for FDH operations
pub type Result<T> = std::result::Result<T, FdhError>;

/// Main error type for shared FDH utilities
#[derive(Error, Debug)]
pub enum FdhError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
