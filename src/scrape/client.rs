//! HTTP client for the guest job-search endpoint.
//!
//! One [`PageFetcher`] is created per run and reused for every page,
//! taking advantage of connection pooling. A fetch retries transient
//! failures per the configured [`RetryPolicy`] and self-throttles after
//! each success so subsequent calls are naturally spaced out.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::FetchError;
use super::retry::{RetryDecision, RetryPolicy, classify_error};
use crate::config::AppConfig;
use crate::search::ExperienceLevel;

/// LinkedIn's public guest job-search endpoint.
pub const BASE_SEARCH_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// HTTP client for fetching search-results pages.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    base_url: String,
    retry_policy: RetryPolicy,
    throttle: Duration,
}

impl PageFetcher {
    /// Creates a fetcher from the run configuration.
    ///
    /// The client sends a browser-like User-Agent (the endpoint rejects
    /// default clients) plus Accept headers, and applies the configured
    /// request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(config: &AppConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let user_agent = HeaderValue::from_str(&config.user_agent).unwrap_or_else(|_| {
            warn!("configured user_agent is not a valid header value; using default");
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
        });

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(config.timeout())
            .cookie_store(true)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");

        Self {
            client,
            base_url: BASE_SEARCH_URL.to_string(),
            retry_policy: RetryPolicy::with_max_attempts(config.max_retries.max(1)),
            throttle: config.throttle(),
        }
    }

    /// Overrides the endpoint base URL (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the retry policy (tests use short backoff delays).
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Builds the search URL for one page.
    fn build_search_url(
        &self,
        keyword: &str,
        location: &str,
        offset: usize,
        experience: Option<ExperienceLevel>,
    ) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| FetchError::invalid_url(&self.base_url))?;
        url.query_pairs_mut()
            .append_pair("keywords", keyword)
            .append_pair("location", location)
            .append_pair("start", &offset.to_string());
        if let Some(level) = experience {
            url.query_pairs_mut().append_pair("f_E", level.code());
        }
        Ok(url)
    }

    /// Fetches one page of search results.
    ///
    /// Transient failures are retried with backoff per the policy. On
    /// success the fetcher sleeps the configured throttle delay before
    /// returning, so the caller's next fetch is naturally spaced out.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Blocked`] for HTTP 403 (never retried), and the
    /// final error once retries are exhausted for everything else.
    #[instrument(skip(self), fields(offset))]
    pub async fn fetch_page(
        &self,
        keyword: &str,
        location: &str,
        offset: usize,
        experience: Option<ExperienceLevel>,
    ) -> Result<String, FetchError> {
        let url = self.build_search_url(keyword, location, offset, experience)?;
        let mut attempt: u32 = 1;

        loop {
            match self.try_fetch(url.as_str()).await {
                Ok(body) => {
                    debug!(bytes = body.len(), "page fetched");
                    if !self.throttle.is_zero() {
                        tokio::time::sleep(self.throttle).await;
                    }
                    return Ok(body);
                }
                Err(error) => {
                    let kind = classify_error(&error);
                    match self.retry_policy.should_retry(kind, attempt) {
                        RetryDecision::Retry {
                            delay,
                            attempt: next,
                        } => {
                            warn!(
                                error = %error,
                                attempt,
                                delay_ms = delay.as_millis(),
                                "fetch failed; retrying"
                            );
                            tokio::time::sleep(delay).await;
                            attempt = next;
                        }
                        RetryDecision::DoNotRetry { reason } => {
                            debug!(%reason, "giving up on page");
                            return Err(error);
                        }
                    }
                }
            }
        }
    }

    /// Issues a single GET and maps the response to a body or error.
    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, err)
            }
        })?;

        let status = response.status().as_u16();
        match status {
            200..=299 => response
                .text()
                .await
                .map_err(|err| FetchError::network(url, err)),
            403 => Err(FetchError::blocked(url, status)),
            _ => Err(FetchError::http_status(url, status)),
        }
    }
}
