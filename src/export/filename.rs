//! Output filename and directory handling.

use std::env;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::config::AppConfig;

/// Maximum length kept from a sanitized filename component.
const MAX_COMPONENT_LEN: usize = 50;

/// Fallback when sanitization leaves nothing usable.
const FALLBACK_COMPONENT: &str = "untitled";

/// Sanitizes a user-supplied string into a safe filename component.
///
/// Characters that are invalid on common filesystems become underscores,
/// leading/trailing dots and spaces are trimmed, and the result is capped
/// at 50 characters. An empty result falls back to `"untitled"`.
pub fn sanitize_filename(input: &str) -> String {
    let mut sanitized: String = input
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            ' ' => '_',
            c => c,
        })
        .collect();

    sanitized = sanitized.trim_matches(['.', '_']).to_string();

    if sanitized.chars().count() > MAX_COMPONENT_LEN {
        sanitized = sanitized.chars().take(MAX_COMPONENT_LEN).collect();
    }

    if sanitized.is_empty() {
        FALLBACK_COMPONENT.to_string()
    } else {
        sanitized
    }
}

/// Builds the timestamped output filename for a run.
///
/// Shape: `linkedin_jobs_<title>_<location>_<YYYY-MM-DD_HH-MM-SS>.<ext>`.
pub fn output_filename(keyword: &str, location: &str, extension: &str) -> String {
    output_filename_at(keyword, location, extension, Local::now())
}

fn output_filename_at(
    keyword: &str,
    location: &str,
    extension: &str,
    now: DateTime<Local>,
) -> String {
    format!(
        "linkedin_jobs_{}_{}_{}.{}",
        sanitize_filename(keyword),
        sanitize_filename(location),
        now.format("%Y-%m-%d_%H-%M-%S"),
        extension
    )
}

/// Resolves the directory output files land in, creating it if needed.
///
/// With `save_to_downloads` set, the base is `$XDG_DOWNLOAD_DIR`, then
/// `~/Downloads`, then the home directory itself; otherwise the current
/// directory. The configured `output_folder` is appended. If the directory
/// cannot be created the current directory is used with a warning rather
/// than failing the run.
pub fn resolve_output_dir(config: &AppConfig) -> PathBuf {
    let base = if config.save_to_downloads {
        downloads_dir()
    } else {
        PathBuf::from(".")
    };

    let dir = base.join(&config.output_folder);
    match fs::create_dir_all(&dir) {
        Ok(()) => dir,
        Err(error) => {
            warn!(dir = %dir.display(), %error, "cannot create output directory, using current dir");
            PathBuf::from(".")
        }
    }
}

fn downloads_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_DOWNLOAD_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    if let Ok(home) = env::var("HOME")
        && !home.is_empty()
    {
        let downloads = PathBuf::from(&home).join("Downloads");
        if downloads.is_dir() {
            return downloads;
        }
        return PathBuf::from(home);
    }
    PathBuf::from(".")
}
