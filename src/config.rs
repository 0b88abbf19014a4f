//! Run configuration loaded from a JSON file with built-in defaults.
//!
//! Every key is optional in the file; missing keys fall back to the built-in
//! default for that key. An unreadable or invalid file falls back wholesale
//! with a warning - a bad config never aborts a run. When no file exists at
//! the given path, a default one is written so the user has something to edit.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Browser-like User-Agent sent by default. The guest endpoint rejects
/// requests that identify as a non-browser client.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for a scrape run.
///
/// Loaded once at process start and never mutated during a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Location used when the user accepts the location prompt default.
    pub default_location: String,

    /// Job count used when the user accepts the count prompt default.
    pub default_num_jobs: usize,

    /// Upper bound on how many jobs a single run may request.
    pub max_jobs_limit: usize,

    /// Folder name for output files, joined onto the output base directory.
    pub output_folder: String,

    /// Self-throttle delay after each successful page fetch, in seconds.
    pub delay_between_requests: f64,

    /// Maximum attempts per page for transient failures.
    pub max_retries: u32,

    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,

    /// Whether output goes under the user's Downloads folder (true) or the
    /// current directory (false).
    pub save_to_downloads: bool,

    /// Whether a JSON sibling is written next to the CSV by default.
    pub export_json: bool,

    /// Whether the progress bar is shown during collection.
    pub show_progress_bar: bool,

    /// Whether a run log text file is written to the output folder.
    pub log_to_file: bool,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_location: "India".to_string(),
            default_num_jobs: 50,
            max_jobs_limit: 500,
            output_folder: "job_results".to_string(),
            delay_between_requests: 2.5,
            max_retries: 3,
            timeout_seconds: 30,
            save_to_downloads: true,
            export_json: false,
            show_progress_bar: true,
            log_to_file: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path`.
    ///
    /// Missing keys take their defaults. A file that cannot be read or parsed
    /// is reported with a warning and replaced by the defaults. When the file
    /// does not exist, the defaults are written to `path` (best effort) and
    /// returned.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(err) = config.write_to(path) {
                debug!(path = %path.display(), error = %err, "could not write default config file");
            }
            return config;
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read config file; using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "invalid config file; using defaults");
                Self::default()
            }
        }
    }

    /// Writes this configuration to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)
    }

    /// Self-throttle delay as a [`Duration`]. Negative values clamp to zero.
    #[must_use]
    pub fn throttle(&self) -> Duration {
        Duration::from_secs_f64(self.delay_between_requests.max(0.0))
    }

    /// HTTP request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
