//! Error types
//!
//! Per-file failures (`ScanError`, `FileOperationError`) are converted into
//! recorded outcomes by the pipeline. Only `BatchError` ever stops a run.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a file could not be meaningfully scanned. Every variant turns into
/// a `skipped` outcome.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unsupported file type: expected .docx, got {}", extension_label(.0))]
    UnsupportedFile(PathBuf),

    #[error("not a valid .docx container: {0}")]
    CorruptArchive(#[from] zip::result::ZipError),

    #[error("malformed markup in {part}: {reason}")]
    MalformedPart { part: String, reason: String },

    #[error("failed to process {part}: {reason}")]
    Processing { part: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub(crate) fn malformed(part: &str, reason: impl ToString) -> Self {
        ScanError::MalformedPart {
            part: part.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn processing(part: &str, reason: impl ToString) -> Self {
        ScanError::Processing {
            part: part.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn extension_label(path: &std::path::Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!(".{ext}"),
        None => "no extension".to_string(),
    }
}

/// A copy into a destination root failed.
#[derive(Debug, Error)]
#[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
pub struct FileOperationError {
    pub from: PathBuf,
    pub to: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Configuration problems detected before any file is touched, and report
/// write failures at the end of a run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input path not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("output root is not a directory: {}", .0.display())]
    InvalidOutputRoot(PathBuf),

    #[error("failed to walk {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] ReportError),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
