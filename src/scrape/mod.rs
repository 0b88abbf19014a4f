//! HTTP page fetching, listing-card extraction, and the pagination driver.
//!
//! One fetch is in flight at a time: the driver requests a page, the fetcher
//! retries transient failures with backoff, the extractor turns listing
//! fragments into [`JobRecord`]s, and the driver accumulates them until the
//! requested count is reached or the endpoint runs dry.

mod client;
mod driver;
mod error;
mod extract;
mod retry;

pub use client::{BASE_SEARCH_URL, PageFetcher};
pub use driver::{JOBS_PER_PAGE, NullProgress, ProgressSink, RunStats, StopReason, collect};
pub use error::FetchError;
pub use extract::{JobRecord, NOT_AVAILABLE, extract_card, parse_listing_page};
pub use retry::{DEFAULT_MAX_RETRIES, FailureKind, RetryDecision, RetryPolicy, classify_error};
