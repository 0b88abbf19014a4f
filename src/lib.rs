//! Jobharvest Core Library
//!
//! This library provides the core functionality for the jobharvest tool,
//! which queries LinkedIn's public guest job-search endpoint, parses the
//! returned listing cards, deduplicates the results, and exports them to
//! CSV/JSON.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Run configuration loaded from `config.json`
//! - [`search`] - Search request types and input validation
//! - [`scrape`] - HTTP page fetcher, field extractor, and pagination driver
//! - [`dedupe`] - Near-duplicate removal
//! - [`export`] - CSV/JSON export and output path resolution
//! - [`report`] - Run log file and run summary

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dedupe;
pub mod export;
pub mod report;
pub mod scrape;
pub mod search;

// Re-export commonly used types
pub use config::AppConfig;
pub use dedupe::dedupe;
pub use export::{ExportError, export_csv, export_json, output_filename, resolve_output_dir};
pub use report::{RunLog, RunSummary};
pub use scrape::{
    FetchError, JobRecord, NullProgress, PageFetcher, ProgressSink, RetryPolicy, RunStats,
    StopReason, collect,
};
pub use search::{ExperienceLevel, SearchRequest, validate_job_count};
