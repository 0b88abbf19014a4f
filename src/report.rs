//! Run log file and end-of-run summary.
//!
//! The run log is a plain text file alongside the exports, meant for users
//! who want a record of what a run did without turning on console verbosity.
//! Writing it must never fail the run; errors degrade to a tracing warning.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use tracing::warn;

/// Appends timestamped entries to `scraper_log_<timestamp>.txt`.
///
/// Disabled instances swallow writes entirely.
pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    /// Creates a run log in `dir`, or a disabled one when `enabled` is false.
    pub fn new(dir: &Path, enabled: bool) -> Self {
        if !enabled {
            return Self { path: None };
        }
        let name = format!("scraper_log_{}.txt", Local::now().format("%Y-%m-%d_%H-%M-%S"));
        Self {
            path: Some(dir.join(name)),
        }
    }

    /// The log file path, if logging is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, message: &str) {
        self.append("INFO", message);
    }

    pub fn warning(&self, message: &str) {
        self.append("WARNING", message);
    }

    pub fn error(&self, message: &str) {
        self.append("ERROR", message);
    }

    fn append(&self, level: &str, message: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let line = format!(
            "[{}] [{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        );
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(error) = result {
            warn!(path = %path.display(), %error, "run log write failed");
        }
    }
}

/// Figures for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub jobs: usize,
    pub duplicates_removed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Elapsed time as `"X min Y sec"`, or `"Y sec"` under a minute.
    pub fn elapsed_display(&self) -> String {
        let total = self.elapsed.as_secs();
        let minutes = total / 60;
        let seconds = total % 60;
        if minutes > 0 {
            format!("{minutes} min {seconds} sec")
        } else {
            format!("{seconds} sec")
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} jobs scraped, {} duplicates removed, took {}",
            self.jobs,
            self.duplicates_removed,
            self.elapsed_display()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_log_appends_entries() {
        let dir = TempDir::new().unwrap();
        let log = RunLog::new(dir.path(), true);
        log.info("starting");
        log.warning("slow page");
        log.error("blocked");

        let contents = std::fs::read_to_string(log.path().unwrap()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[INFO] starting"));
        assert!(lines[1].contains("[WARNING] slow page"));
        assert!(lines[2].contains("[ERROR] blocked"));
    }

    #[test]
    fn test_run_log_filename_shape() {
        let dir = TempDir::new().unwrap();
        let log = RunLog::new(dir.path(), true);
        let name = log.path().unwrap().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("scraper_log_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_run_log_disabled_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let log = RunLog::new(dir.path(), false);
        log.info("dropped");
        assert!(log.path().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_summary_elapsed_under_a_minute() {
        let summary = RunSummary {
            jobs: 10,
            duplicates_removed: 2,
            elapsed: Duration::from_secs(42),
        };
        assert_eq!(summary.elapsed_display(), "42 sec");
    }

    #[test]
    fn test_summary_elapsed_with_minutes() {
        let summary = RunSummary {
            jobs: 100,
            duplicates_removed: 0,
            elapsed: Duration::from_secs(185),
        };
        assert_eq!(summary.elapsed_display(), "3 min 5 sec");
        assert_eq!(
            summary.to_string(),
            "100 jobs scraped, 0 duplicates removed, took 3 min 5 sec"
        );
    }
}
