//! Configuration for the harvest pipeline
//!
//! Endpoint, header, retry, and concurrency settings. Header and proxy
//! literals are configuration data handed to the transport, not identity of
//! the pipeline itself.

use crate::backoff::BackoffPolicy;
use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Default Endpoint and Transport Constants
// ============================================================================

/// Default listing search endpoint (POST, URL-encoded form body).
pub const DEFAULT_LIST_URL: &str = "https://client.schwab.com/public/consultant/searchByName/";

/// Default base URL for per-identity detail pages (GET, id appended).
pub const DEFAULT_DETAIL_BASE_URL: &str =
    "https://www.schwab.com/app/branch-services/financial-consultant";

/// Default page size for listing requests.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default retry bound per page / per identity.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default concurrency ceiling for the detail phase.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

/// Default `Origin` header for listing requests.
pub const DEFAULT_ORIGIN: &str = "https://client.schwab.com";

/// Default `Referer` header for listing requests.
pub const DEFAULT_REFERER: &str = "https://client.schwab.com/public/consultant/find";

/// Default output directory for list-phase artifacts.
pub const DEFAULT_LIST_DIR: &str = "results_list";

/// Default output directory for detail-phase artifacts.
pub const DEFAULT_DETAILS_DIR: &str = "results_details";

/// Forward proxy settings for the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy URL, e.g. `http://proxy.example.com:9000`
    pub url: String,
    /// Optional basic-auth username
    pub username: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
}

/// Configuration for both harvest phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Listing search endpoint (POST)
    pub list_url: String,

    /// Base URL for detail pages; the identity is appended as a path segment
    pub detail_base_url: String,

    /// Records requested per listing page
    pub page_size: u32,

    /// Optional cap on pages per shard; `None` runs to natural termination
    pub max_pages: Option<u32>,

    /// Attempts per fetch before the error is escalated
    pub max_attempts: u32,

    /// Backoff between list-page retry attempts
    pub list_backoff: BackoffPolicy,

    /// Backoff between detail retry attempts
    pub detail_backoff: BackoffPolicy,

    /// Concurrency ceiling for the detail phase
    pub concurrency: usize,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,

    /// `Origin` header for listing requests
    pub origin: String,

    /// `Referer` header for listing requests
    pub referer: String,

    /// Optional forward proxy
    pub proxy: Option<ProxyConfig>,

    /// Directory for list-phase artifacts
    pub list_dir: PathBuf,

    /// Directory for detail-phase artifacts
    pub details_dir: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            list_url: DEFAULT_LIST_URL.to_string(),
            detail_base_url: DEFAULT_DETAIL_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            list_backoff: BackoffPolicy::Fixed(2000),
            detail_backoff: BackoffPolicy::Linear(1000),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            proxy: None,
            list_dir: PathBuf::from(DEFAULT_LIST_DIR),
            details_dir: PathBuf::from(DEFAULT_DETAILS_DIR),
        }
    }
}

impl ScrapeConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `FDH_LIST_URL`, `FDH_DETAIL_URL`: endpoint overrides
    /// - `FDH_PAGE_SIZE`, `FDH_MAX_ATTEMPTS`, `FDH_CONCURRENCY`: numeric knobs
    /// - `FDH_TIMEOUT_SECS`: per-request timeout
    /// - `FDH_PROXY_URL`, `FDH_PROXY_USER`, `FDH_PROXY_PASS`: proxy settings
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("FDH_LIST_URL") {
            config.list_url = url;
        }

        if let Ok(url) = std::env::var("FDH_DETAIL_URL") {
            config.detail_base_url = url;
        }

        if let Ok(size) = std::env::var("FDH_PAGE_SIZE") {
            config.page_size = parse_env("FDH_PAGE_SIZE", &size)?;
        }

        if let Ok(attempts) = std::env::var("FDH_MAX_ATTEMPTS") {
            config.max_attempts = parse_env("FDH_MAX_ATTEMPTS", &attempts)?;
        }

        if let Ok(concurrency) = std::env::var("FDH_CONCURRENCY") {
            config.concurrency = parse_env("FDH_CONCURRENCY", &concurrency)?;
        }

        if let Ok(secs) = std::env::var("FDH_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_env("FDH_TIMEOUT_SECS", &secs)?);
        }

        if let Ok(url) = std::env::var("FDH_PROXY_URL") {
            config.proxy = Some(ProxyConfig {
                url,
                username: std::env::var("FDH_PROXY_USER").ok(),
                password: std::env::var("FDH_PROXY_PASS").ok(),
            });
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ScrapeError::config(format!("invalid value '{}' for {}", value, name)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_transport_contract() {
        let config = ScrapeConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.list_backoff, BackoffPolicy::Fixed(2000));
        assert_eq!(config.detail_backoff, BackoffPolicy::Linear(1000));
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("FDH_PAGE_SIZE", "300");
        std::env::set_var("FDH_CONCURRENCY", "5");
        std::env::set_var("FDH_PROXY_URL", "http://proxy.example.com:9000");

        let config = ScrapeConfig::from_env().unwrap();
        assert_eq!(config.page_size, 300);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.proxy.unwrap().url, "http://proxy.example.com:9000");

        std::env::remove_var("FDH_PAGE_SIZE");
        std::env::remove_var("FDH_CONCURRENCY");
        std::env::remove_var("FDH_PROXY_URL");
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        std::env::set_var("FDH_MAX_ATTEMPTS", "lots");
        let result = ScrapeConfig::from_env();
        assert!(result.is_err());
        std::env::remove_var("FDH_MAX_ATTEMPTS");
    }
}
