//! End-to-end tests for the list phase: HTTP-level behavior against a mock
//! server, and shard failure semantics against a fake source.

use async_trait::async_trait;
use fdh_scrape::backoff::BackoffPolicy;
use fdh_scrape::config::ScrapeConfig;
use fdh_scrape::error::{FetchScope, Result, ScrapeError};
use fdh_scrape::fetch::{HttpFetcher, ListSource};
use fdh_scrape::list::{harvest_list, ListOutcome, ShardPlan};
use fdh_scrape::observer::NoopObserver;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn result_node(id: &str, name: &str) -> String {
    format!(
        r##"<div id="fcSearchResult">
            <a id="fcDisplayName" href="javascript:openProfile('{id}')">{name}</a>
            <span id="fcJobTitle">Consultant</span>
        </div>"##
    )
}

fn page_html(ids: &[(&str, &str)]) -> String {
    let nodes: String = ids.iter().map(|(id, name)| result_node(id, name)).collect();
    format!("<html><body>{nodes}</body></html>")
}

fn test_config(server_url: &str, list_dir: &std::path::Path) -> ScrapeConfig {
    ScrapeConfig {
        list_url: format!("{server_url}/public/consultant/searchByName/"),
        page_size: 100,
        max_attempts: 3,
        list_backoff: BackoffPolicy::Fixed(1),
        list_dir: list_dir.to_path_buf(),
        ..ScrapeConfig::default()
    }
}

#[tokio::test]
async fn flat_mode_stops_at_first_empty_page() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/public/consultant/searchByName/"))
        .and(body_string_contains("resultMax=0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page_html(&[("a1", "One"), ("a2", "Two")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("resultMax=100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&[("a3", "Three")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("resultMax=200"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&[])))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), tmp.path());
    let fetcher = HttpFetcher::new(config.clone()).unwrap();
    let outcome = harvest_list(&fetcher, &ShardPlan::Flat, &config, &NoopObserver)
        .await
        .unwrap();

    // Accumulation equals the sum of the non-empty pages
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.total_records, 3);
    assert_eq!(outcome.unique.len(), 3);
    assert!(outcome.aborted_shards.is_empty());

    let ids: Vec<&str> = outcome.unique.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3"]);

    // Per-page and final artifacts on disk
    for name in [
        "profiles_page_1.json",
        "profiles_page_1.csv",
        "profiles_page_2.json",
        "profiles_all.json",
        "profiles_all.csv",
        "profiles_unique.json",
        "profiles_unique.csv",
    ] {
        assert!(tmp.path().join(name).exists(), "{name} missing");
    }
    assert!(!tmp.path().join("profiles_page_3.json").exists());
}

#[tokio::test]
async fn list_request_sends_form_fields() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(body_string_contains("searchString=k"))
        .and(body_string_contains("pageSize=100"))
        .and(body_string_contains("resultMax=0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), tmp.path());
    let fetcher = HttpFetcher::new(config).unwrap();
    let html = fetcher.fetch_page(Some('k'), 1).await.unwrap();
    assert!(html.contains("<html>"));
}

#[tokio::test]
async fn retry_bound_is_honored_on_server_errors() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), tmp.path());
    let fetcher = HttpFetcher::new(config).unwrap();
    let err = fetcher.fetch_page(None, 1).await.unwrap_err();

    match err {
        ScrapeError::RetriesExhausted { scope, attempts, .. } => {
            assert_eq!(attempts, 3);
            assert_eq!(scope, FetchScope::Page { shard: None, page: 1 });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetch_recovers_when_server_heals_within_bound() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&[("a1", "One")])))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), tmp.path());
    let fetcher = HttpFetcher::new(config).unwrap();
    let html = fetcher.fetch_page(None, 1).await.unwrap();
    assert!(html.contains("a1"));
}

/// Fake source: shard 'b' always exhausts retries, every other shard yields
/// one page then terminates.
struct FlakyShards;

#[async_trait]
impl ListSource for FlakyShards {
    async fn fetch_page(&self, shard: Option<char>, page: u32) -> Result<String> {
        match (shard, page) {
            (Some('b'), _) => Err(ScrapeError::retries_exhausted(
                FetchScope::Page { shard, page },
                3,
                ScrapeError::config("connection reset"),
            )),
            (Some(key), 1) => Ok(page_html(&[(&format!("{key}1"), "Someone")])),
            _ => Ok(page_html(&[])),
        }
    }
}

#[tokio::test]
async fn aborted_shard_preserves_other_shards() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ScrapeConfig {
        list_dir: tmp.path().to_path_buf(),
        ..ScrapeConfig::default()
    };

    let plan = ShardPlan::Keyed(vec!['a', 'b', 'c']);
    let ListOutcome {
        unique,
        total_records,
        aborted_shards,
        ..
    } = harvest_list(&FlakyShards, &plan, &config, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(total_records, 2);
    assert_eq!(aborted_shards.len(), 1);
    assert_eq!(aborted_shards[0].0, Some('b'));

    let ids: Vec<&str> = unique.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "c1"]);

    // Healthy shards' records still reach the final artifacts
    assert!(tmp.path().join("profiles_unique.json").exists());
    assert!(tmp.path().join("profiles_a_page_1.json").exists());
    assert!(!tmp.path().join("profiles_b_page_1.json").exists());
}

#[tokio::test]
async fn max_pages_caps_flat_mode() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    // Every page has records; only the cap can stop the loop
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&[("x", "X")])))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri(), tmp.path());
    config.max_pages = Some(2);
    let fetcher = HttpFetcher::new(config.clone()).unwrap();
    let outcome = harvest_list(&fetcher, &ShardPlan::Flat, &config, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.total_records, 2);
    // Same id on both pages: dedup keeps the first
    assert_eq!(outcome.unique.len(), 1);
}
