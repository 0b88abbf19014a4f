//! Field extraction from listing-card fragments.
//!
//! Fields are located by structural markers (tag + class identity), never by
//! position, because the endpoint does not guarantee markup order. Each
//! marker has fallbacks ordered from most to least specific; a field whose
//! markers are all absent yields `"N/A"`. A fragment only fails extraction
//! outright when it lacks the title/link anchor that identifies it as a
//! listing at all.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Sentinel for a field not present in the source markup.
pub const NOT_AVAILABLE: &str = "N/A";

/// Site prefix used to absolutize relative job URLs.
const SITE_PREFIX: &str = "https://www.linkedin.com";

/// One scraped job listing. All fields are display strings; `"N/A"` marks a
/// field missing from the source markup. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    /// Job title.
    #[serde(rename = "job_title")]
    pub title: String,

    /// Company name.
    pub company: String,

    /// Location string as displayed.
    pub location: String,

    /// Absolute job URL with tracking query parameters stripped.
    pub url: String,

    /// Posted-date text (ISO date when the markup carries one).
    pub posted_date: String,
}

/// Compiled selectors for the listing-card markers.
struct Markers {
    card: Selector,
    title: Vec<Selector>,
    company: Vec<Selector>,
    location: Vec<Selector>,
    link: Vec<Selector>,
    date: Vec<Selector>,
}

impl Markers {
    // Selector strings are static and known-valid.
    #[allow(clippy::expect_used)]
    fn new() -> Self {
        let sel = |s: &str| Selector::parse(s).expect("static selector");
        Self {
            card: sel("li"),
            title: vec![
                sel("h3.base-search-card__title"),
                sel(r#"h3[class*="title"]"#),
                sel("h3"),
                sel("a.base-card__full-link"),
            ],
            company: vec![
                sel("h4.base-search-card__subtitle"),
                sel("a.hidden-nested-link"),
                sel("h4"),
                sel(r#"a[class*="company"]"#),
            ],
            location: vec![
                sel("span.job-search-card__location"),
                sel(r#"span[class*="location"]"#),
                sel("span.base-search-card__metadata"),
            ],
            link: vec![
                sel("a.base-card__full-link"),
                sel(r#"a[href*="/jobs/view/"]"#),
                sel("a[href]"),
            ],
            date: vec![
                sel("time.job-search-card__listdate"),
                sel("time.job-search-card__listdate--new"),
                sel("time"),
                sel(r#"span[class*="date"]"#),
            ],
        }
    }
}

/// Parses all listing cards on one search-results page.
///
/// Returns the extracted records in document order plus the number of
/// fragments that were skipped because they lacked the listing anchor.
#[must_use]
pub fn parse_listing_page(html: &str) -> (Vec<JobRecord>, usize) {
    let markers = Markers::new();
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    let mut skipped = 0;
    for card in document.select(&markers.card) {
        match extract_from(card, &markers) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    (records, skipped)
}

/// Extracts one record from a standalone listing fragment.
///
/// Returns `None` when the fragment lacks the title/link anchor.
#[must_use]
pub fn extract_card(fragment: &str) -> Option<JobRecord> {
    let markers = Markers::new();
    let document = Html::parse_fragment(fragment);
    extract_from(document.root_element(), &markers)
}

fn extract_from(card: ElementRef<'_>, markers: &Markers) -> Option<JobRecord> {
    let title = first_text(card, &markers.title);

    // The title is the anchor that identifies a fragment as a listing;
    // without it (or with degenerate text) the fragment is skipped.
    if title == NOT_AVAILABLE || title.chars().count() < 2 {
        return None;
    }

    let url = first_href(card, &markers.link)
        .map(absolutize_job_url)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    if url == NOT_AVAILABLE {
        return None;
    }

    let posted_date = markers
        .date
        .iter()
        .find_map(|sel| card.select(sel).next())
        .map(|el| {
            el.value()
                .attr("datetime")
                .map_or_else(|| element_text(el), ToString::to_string)
        })
        .filter(|text| text != NOT_AVAILABLE)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Some(JobRecord {
        title,
        company: first_text(card, &markers.company),
        location: first_text(card, &markers.location),
        url,
        posted_date,
    })
}

/// Text of the first element matching any selector, in fallback order.
fn first_text(card: ElementRef<'_>, selectors: &[Selector]) -> String {
    selectors
        .iter()
        .find_map(|sel| card.select(sel).next())
        .map_or_else(|| NOT_AVAILABLE.to_string(), element_text)
}

fn first_href(card: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .flat_map(|sel| card.select(sel))
        .find_map(|el| el.value().attr("href"))
        .map(ToString::to_string)
}

/// Collects an element's text with whitespace collapsed and trimmed.
fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

/// Collapses runs of whitespace to single spaces and trims; empty input
/// yields the `"N/A"` sentinel.
fn clean_text(text: &str) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        cleaned
    }
}

/// Absolutizes a job href against the site and strips the query string
/// (tracking parameters only; the path identifies the posting).
fn absolutize_job_url(href: String) -> String {
    let absolute = if href.starts_with('/') {
        format!("{SITE_PREFIX}{href}")
    } else if !href.starts_with("http") {
        format!("{SITE_PREFIX}/{href}")
    } else {
        href
    };
    match absolute.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => absolute,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FULL_CARD: &str = r#"
        <li>
          <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/data-analyst-at-acme-123?refId=abc&trackingId=def">
            <span class="sr-only">Data Analyst</span>
          </a>
          <h3 class="base-search-card__title">  Data   Analyst </h3>
          <h4 class="base-search-card__subtitle">Acme Corp</h4>
          <span class="job-search-card__location">New York, NY</span>
          <time class="job-search-card__listdate" datetime="2026-08-12">2 weeks ago</time>
        </li>
    "#;

    #[test]
    fn test_extract_card_full_fragment() {
        let record = extract_card(FULL_CARD).unwrap();
        assert_eq!(record.title, "Data Analyst");
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.location, "New York, NY");
        assert_eq!(
            record.url,
            "https://www.linkedin.com/jobs/view/data-analyst-at-acme-123"
        );
        assert_eq!(record.posted_date, "2026-08-12");
    }

    #[test]
    fn test_extract_card_whitespace_normalized() {
        let record = extract_card(FULL_CARD).unwrap();
        // "  Data   Analyst " collapses to "Data Analyst"
        assert_eq!(record.title, "Data Analyst");
    }

    #[test]
    fn test_extract_card_missing_company_and_location_yield_na() {
        let fragment = r#"
            <li>
              <h3 class="base-search-card__title">Backend Engineer</h3>
              <a class="base-card__full-link" href="/jobs/view/456"></a>
            </li>
        "#;
        let record = extract_card(fragment).unwrap();
        assert_eq!(record.company, NOT_AVAILABLE);
        assert_eq!(record.location, NOT_AVAILABLE);
        assert_eq!(record.posted_date, NOT_AVAILABLE);
    }

    #[test]
    fn test_extract_card_missing_title_anchor_returns_none() {
        let fragment = r#"
            <li>
              <h4 class="base-search-card__subtitle">Acme Corp</h4>
              <span class="job-search-card__location">Berlin</span>
            </li>
        "#;
        assert!(extract_card(fragment).is_none());
    }

    #[test]
    fn test_extract_card_missing_link_returns_none() {
        let fragment = r#"<li><h3 class="base-search-card__title">Engineer</h3></li>"#;
        assert!(extract_card(fragment).is_none());
    }

    #[test]
    fn test_extract_card_relative_url_absolutized() {
        let fragment = r#"
            <li>
              <h3 class="base-search-card__title">Engineer</h3>
              <a class="base-card__full-link" href="/jobs/view/789?tracking=x"></a>
            </li>
        "#;
        let record = extract_card(fragment).unwrap();
        assert_eq!(record.url, "https://www.linkedin.com/jobs/view/789");
    }

    #[test]
    fn test_extract_card_fallback_markers() {
        // No LinkedIn-specific classes: plain h3/h4 and a generic href.
        let fragment = r#"
            <li>
              <h3>QA Engineer</h3>
              <h4>Beta LLC</h4>
              <a href="/jobs/view/42"></a>
              <time>3 days ago</time>
            </li>
        "#;
        let record = extract_card(fragment).unwrap();
        assert_eq!(record.title, "QA Engineer");
        assert_eq!(record.company, "Beta LLC");
        assert_eq!(record.url, "https://www.linkedin.com/jobs/view/42");
        assert_eq!(record.posted_date, "3 days ago");
    }

    #[test]
    fn test_parse_listing_page_counts_skipped_fragments() {
        let html = format!(
            "<ul>{FULL_CARD}<li><span>advertisement</span></li>{FULL_CARD}</ul>"
        );
        let (records, skipped) = parse_listing_page(&html);
        assert_eq!(records.len(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_listing_page_empty_page() {
        let (records, skipped) = parse_listing_page("<ul></ul>");
        assert!(records.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_job_record_json_field_names() {
        let record = extract_card(FULL_CARD).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("job_title").is_some());
        assert!(json.get("company").is_some());
        assert!(json.get("location").is_some());
        assert!(json.get("url").is_some());
        assert!(json.get("posted_date").is_some());
    }
}
