//! End-to-end pipeline tests: mocked endpoint -> collect -> dedupe -> export.

use std::time::Duration;

use jobharvest_core::{
    AppConfig, NullProgress, PageFetcher, RetryPolicy, SearchRequest, StopReason, collect, dedupe,
    export_csv,
};
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing_html(count: usize, tag: &str) -> String {
    let cards: String = (0..count)
        .map(|i| {
            format!(
                r#"<li>
                    <div class="base-search-card">
                        <h3 class="base-search-card__title">{tag} role {i}</h3>
                        <h4 class="base-search-card__subtitle">Company {i}, Inc.</h4>
                        <span class="job-search-card__location">City {i}, State</span>
                        <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/{tag}-{i}?refId=abc"></a>
                        <time class="job-search-card__listdate" datetime="2026-08-0{d}">1 week ago</time>
                    </div>
                </li>"#,
                d = (i % 9) + 1,
            )
        })
        .collect();
    format!("<ul>{cards}</ul>")
}

fn test_fetcher(uri: String) -> PageFetcher {
    let config = AppConfig {
        delay_between_requests: 0.0,
        timeout_seconds: 5,
        ..AppConfig::default()
    };
    PageFetcher::new(&config)
        .with_base_url(uri)
        .with_retry_policy(RetryPolicy::new(
            2,
            Duration::from_millis(1),
            Duration::from_millis(5),
            2.0,
        ))
}

fn request(count: usize) -> SearchRequest {
    SearchRequest {
        keyword: "Data Analyst".to_string(),
        location: "New York".to_string(),
        desired_count: count,
        experience: None,
    }
}

#[tokio::test]
async fn twenty_five_jobs_across_two_pages_export_to_csv() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(13, "p1")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("start", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(12, "p2")))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(mock_server.uri());
    let (records, stats) = collect(&request(25), &fetcher, &NullProgress).await;

    assert_eq!(records.len(), 25);
    assert_eq!(stats.stop, StopReason::TargetReached);

    let (records, removed) = dedupe(records);
    assert_eq!(removed, 0);

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("jobs.csv");
    export_csv(&records, &path).expect("csv export");

    let bytes = std::fs::read(&path).expect("read csv");
    assert_eq!(&bytes[..3], b"\xef\xbb\xbf");
    let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 body");
    // Header row plus exactly 25 data rows.
    assert_eq!(text.lines().count(), 26);
}

#[tokio::test]
async fn csv_roundtrip_preserves_all_field_values() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(5, "p1")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("start", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ul></ul>"))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(mock_server.uri());
    let (records, _) = collect(&request(100), &fetcher, &NullProgress).await;
    assert_eq!(records.len(), 5);

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("jobs.csv");
    export_csv(&records, &path).expect("csv export");

    let bytes = std::fs::read(&path).expect("read csv");
    let mut reader = csv::Reader::from_reader(&bytes[3..]);
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .map(|r| r.expect("csv row"))
        .collect();
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(&row[0], record.title.as_str());
        assert_eq!(&row[1], record.company.as_str());
        assert_eq!(&row[2], record.location.as_str());
        assert_eq!(&row[3], record.url.as_str());
        assert_eq!(&row[4], record.posted_date.as_str());
    }
    // Company fields contain commas; tracking params must be stripped.
    assert!(records[0].company.contains(','));
    assert!(!records[0].url.contains('?'));
}

#[tokio::test]
async fn blocked_on_first_page_yields_no_records_and_no_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(mock_server.uri());
    let (records, stats) = collect(&request(25), &fetcher, &NullProgress).await;

    assert!(records.is_empty());
    assert_eq!(stats.stop, StopReason::Blocked);
}

#[tokio::test]
async fn short_inventory_returns_everything_available() {
    let mock_server = MockServer::start().await;
    for (start, count, tag) in [(0, 25, "p1"), (25, 25, "p2"), (50, 30, "p3")] {
        Mock::given(method("GET"))
            .and(query_param("start", start.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(count, tag)))
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(query_param("start", "75"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ul></ul>"))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(mock_server.uri());
    let (records, stats) = collect(&request(500), &fetcher, &NullProgress).await;

    assert_eq!(records.len(), 80);
    assert_eq!(stats.stop, StopReason::NoMoreResults);
    assert_eq!(stats.pages_fetched, 4);
}

#[tokio::test]
async fn duplicate_postings_across_pages_collapse_after_collect() {
    let mock_server = MockServer::start().await;
    // Same roles on both pages under different tracking URLs.
    Mock::given(method("GET"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(10, "dup")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("start", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(10, "dup")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("start", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ul></ul>"))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(mock_server.uri());
    let (records, _) = collect(&request(500), &fetcher, &NullProgress).await;
    assert_eq!(records.len(), 20);

    let (unique, removed) = dedupe(records);
    assert_eq!(unique.len(), 10);
    assert_eq!(removed, 10);
}
