//! FDH Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the FDH workspace.
//!
//! # Overview
//!
//! This crate provides the functionality used across all FDH workspace
//! members:
//!
//! - **Error Handling**: Custom error type and result alias
//! - **Logging**: Centralized tracing initialization (console/file, text/JSON)

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{FdhError, Result};
