//! Writes scraped records to disk as CSV or JSON.
//!
//! CSV is the primary format and carries a UTF-8 BOM so spreadsheet tools
//! pick the encoding up without prompting. Export failures are fatal to the
//! run; everything upstream degrades gracefully, but losing the output file
//! defeats the point.

mod filename;

pub use filename::{output_filename, resolve_output_dir, sanitize_filename};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::scrape::JobRecord;

/// Column headers for the CSV export, in output order.
pub const CSV_HEADER: [&str; 5] = ["Job Title", "Company", "Location", "URL", "Posted Date"];

/// UTF-8 byte order mark, written ahead of the CSV body.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Errors raised while writing output files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Filesystem failure (create, write, flush).
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failure.
    #[error("failed to serialize CSV to {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON serialization failure.
    #[error("failed to serialize JSON to {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ExportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes `records` to `path` as CSV with a UTF-8 BOM and a header row.
///
/// Fields containing commas, quotes, or newlines are quoted by the writer.
/// Parent directories are created as needed.
pub fn export_csv(records: &[JobRecord], path: &Path) -> Result<(), ExportError> {
    ensure_parent_dir(path)?;

    let mut file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    file.write_all(UTF8_BOM)
        .map_err(|e| ExportError::io(path, e))?;

    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ExportError::csv(path, e))?;
    for record in records {
        writer
            .write_record([
                record.title.as_str(),
                record.company.as_str(),
                record.location.as_str(),
                record.url.as_str(),
                record.posted_date.as_str(),
            ])
            .map_err(|e| ExportError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))?;

    info!(path = %path.display(), rows = records.len(), "CSV export written");
    Ok(())
}

/// Writes `records` to `path` as a pretty-printed JSON array.
pub fn export_json(records: &[JobRecord], path: &Path) -> Result<(), ExportError> {
    ensure_parent_dir(path)?;

    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    serde_json::to_writer_pretty(&file, records).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), records = records.len(), "JSON export written");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(path, e))?;
    }
    Ok(())
}
