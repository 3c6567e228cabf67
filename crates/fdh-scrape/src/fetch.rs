//! HTTP transport for both harvest phases
//!
//! [`ListSource`] and [`DetailSource`] are the seams the orchestrators work
//! against; [`HttpFetcher`] is the reqwest-backed production implementation
//! with bounded retry and backoff. Tests substitute fake sources.

use crate::backoff::BackoffPolicy;
use crate::config::ScrapeConfig;
use crate::error::{FetchScope, Result, ScrapeError};
use crate::extract;
use crate::records::DetailRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use tracing::{debug, warn};

/// Source of raw listing pages.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Fetch one listing page, returning the raw document text.
    ///
    /// A successful response whose document contains no extractable records
    /// is a normal termination signal for the caller, never an error here.
    async fn fetch_page(&self, shard: Option<char>, page: u32) -> Result<String>;
}

/// Source of per-identity detail records.
#[async_trait]
pub trait DetailSource: Send + Sync {
    /// Fetch and extract the detail record for one identity.
    async fn fetch_detail(&self, id: &str) -> Result<DetailRecord>;
}

/// Run `op` up to `max_attempts` times, sleeping per the backoff policy
/// between failures. Exhaustion wraps the last error with the scope and the
/// attempt count.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    scope: FetchScope,
    max_attempts: u32,
    backoff: BackoffPolicy,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                return Err(ScrapeError::retries_exhausted(scope, attempt, err));
            }
            Err(err) => {
                warn!(
                    scope = %scope,
                    attempt,
                    error = %err,
                    "Fetch attempt failed, backing off"
                );
                tokio::time::sleep(backoff.delay(attempt)).await;
                attempt += 1;
            }
        }
    }
}

/// reqwest-backed fetcher for both phases.
pub struct HttpFetcher {
    client: Client,
    config: ScrapeConfig,
}

impl HttpFetcher {
    /// Build a fetcher from the transport configuration.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone());

        if let Some(ref proxy) = config.proxy {
            let mut p = reqwest::Proxy::all(&proxy.url)?;
            if let (Some(user), Some(pass)) = (&proxy.username, &proxy.password) {
                p = p.basic_auth(user, pass);
            }
            builder = builder.proxy(p);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Cursor for the listing form: page 1 starts at 0, later pages at
    /// `(page - 1) * page_size`.
    fn result_max(&self, page: u32) -> u32 {
        if page <= 1 {
            0
        } else {
            (page - 1) * self.config.page_size
        }
    }

    async fn post_page(&self, shard: Option<char>, page: u32) -> Result<String> {
        let search_string = shard.map(String::from).unwrap_or_default();
        let form = [
            ("searchString", search_string),
            ("pageSize", self.config.page_size.to_string()),
            ("resultMax", self.result_max(page).to_string()),
        ];

        let response = self
            .client
            .post(&self.config.list_url)
            .header("accept", "*/*")
            .header("origin", &self.config.origin)
            .header("referer", &self.config.referer)
            .header("x-requested-with", "XMLHttpRequest")
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    async fn get_detail(&self, id: &str) -> Result<String> {
        let url = format!("{}/{}", self.config.detail_base_url, id);
        let response = self
            .client
            .get(&url)
            .header(
                "accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ListSource for HttpFetcher {
    async fn fetch_page(&self, shard: Option<char>, page: u32) -> Result<String> {
        let scope = FetchScope::Page { shard, page };
        debug!(scope = %scope, "Fetching listing page");
        retry_with_backoff(
            scope,
            self.config.max_attempts,
            self.config.list_backoff,
            || self.post_page(shard, page),
        )
        .await
    }
}

#[async_trait]
impl DetailSource for HttpFetcher {
    async fn fetch_detail(&self, id: &str) -> Result<DetailRecord> {
        let scope = FetchScope::Detail { id: id.to_string() };
        debug!(scope = %scope, "Fetching detail page");
        let html = retry_with_backoff(
            scope,
            self.config.max_attempts,
            self.config.detail_backoff,
            || self.get_detail(id),
        )
        .await?;

        Ok(extract::extract_detail(&html))
    }
}
