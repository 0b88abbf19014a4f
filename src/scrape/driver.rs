//! Pagination driver: repeated fetches with increasing offsets until the
//! requested count is reached or the endpoint runs dry.
//!
//! A run is one-shot: fetch failures and blocks stop the loop early and the
//! caller keeps whatever was collected (partial success, not an error).

use tracing::{info, warn};

use super::client::PageFetcher;
use super::extract::{JobRecord, parse_listing_page};
use crate::search::SearchRequest;

/// Listings per page on the guest endpoint; also the offset increment.
pub const JOBS_PER_PAGE: usize = 25;

/// Receives progress updates as records accumulate.
///
/// The binary plugs in an indicatif bar; tests use [`NullProgress`].
pub trait ProgressSink {
    /// Called after each parsed page with the collected count so far,
    /// already clamped to the target.
    fn on_progress(&self, collected: usize, target: usize);
}

/// A [`ProgressSink`] that reports nothing.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&self, _collected: usize, _target: usize) {}
}

/// Why the pagination loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of records was collected.
    TargetReached,

    /// A page yielded zero usable fragments; the endpoint has no more results.
    NoMoreResults,

    /// A fetch exhausted its retries; partial results were kept.
    FetchFailed,

    /// The server blocked us (403, or 429 after retries); partial results
    /// were kept.
    Blocked,
}

/// Statistics for one collection run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Pages successfully fetched and parsed.
    pub pages_fetched: usize,

    /// Fragments skipped because they lacked the listing anchor.
    pub fragments_skipped: usize,

    /// Why the loop stopped.
    pub stop: StopReason,
}

/// Collects up to `request.desired_count` records, one page at a time.
///
/// Result order is the order pages and fragments were encountered. The
/// returned sequence never exceeds `desired_count`. Fetch failures never
/// propagate; they only end the loop early with the corresponding
/// [`StopReason`].
pub async fn collect(
    request: &SearchRequest,
    fetcher: &PageFetcher,
    progress: &dyn ProgressSink,
) -> (Vec<JobRecord>, RunStats) {
    let mut results: Vec<JobRecord> = Vec::new();
    let mut stats = RunStats {
        pages_fetched: 0,
        fragments_skipped: 0,
        stop: StopReason::NoMoreResults,
    };
    let mut offset = 0;

    info!(
        keyword = %request.keyword,
        location = %request.location,
        target = request.desired_count,
        "starting collection"
    );

    loop {
        let html = match fetcher
            .fetch_page(
                &request.keyword,
                &request.location,
                offset,
                request.experience,
            )
            .await
        {
            Ok(html) => html,
            Err(error) => {
                stats.stop = if error.is_block() {
                    warn!(%error, collected = results.len(), "blocked; stopping early");
                    StopReason::Blocked
                } else {
                    warn!(%error, collected = results.len(), "fetch failed; stopping early");
                    StopReason::FetchFailed
                };
                break;
            }
        };

        stats.pages_fetched += 1;
        let (records, skipped) = parse_listing_page(&html);
        stats.fragments_skipped += skipped;

        if records.is_empty() {
            info!(pages = stats.pages_fetched, "no more results");
            stats.stop = StopReason::NoMoreResults;
            break;
        }

        results.extend(records);
        progress.on_progress(results.len().min(request.desired_count), request.desired_count);

        if results.len() >= request.desired_count {
            results.truncate(request.desired_count);
            stats.stop = StopReason::TargetReached;
            break;
        }

        offset += JOBS_PER_PAGE;
    }

    info!(
        collected = results.len(),
        pages = stats.pages_fetched,
        skipped = stats.fragments_skipped,
        stop = ?stats.stop,
        "collection finished"
    );

    (results, stats)
}
