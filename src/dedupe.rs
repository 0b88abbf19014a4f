//! Near-duplicate removal over scraped listings.
//!
//! Two records are duplicates when (title, company, location) match after
//! lowercasing and whitespace normalization. The URL is deliberately not part
//! of the key: repostings of the same role carry distinct URLs and would
//! otherwise survive as noise.

use std::collections::HashSet;

use tracing::debug;

use crate::scrape::JobRecord;

/// Removes near-duplicate records, keeping the first occurrence of each key.
///
/// Order is preserved. Returns the surviving records and the number removed.
/// Running the output through again removes nothing.
pub fn dedupe(records: Vec<JobRecord>) -> (Vec<JobRecord>, usize) {
    let input_len = records.len();
    let mut seen: HashSet<(String, String, String)> = HashSet::with_capacity(input_len);
    let mut unique = Vec::with_capacity(input_len);

    for record in records {
        let key = (
            normalize(&record.title),
            normalize(&record.company),
            normalize(&record.location),
        );
        if seen.insert(key) {
            unique.push(record);
        } else {
            debug!(title = %record.title, company = %record.company, "duplicate removed");
        }
    }

    let removed = input_len - unique.len();
    (unique, removed)
}

/// Lowercases and collapses internal whitespace so cosmetic differences do
/// not defeat the comparison.
fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
