//! Batch processing
//!
//! Drives `scan -> resolve -> report` over a set of input files. Per-file
//! failures are recorded and never stop the batch; only configuration
//! problems found before the first file fail fast.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::document::loader::{DocumentScanner, has_docx_extension};
use crate::document::models::{Label, MoveRecord};
use crate::document::parsing::delimiter::DelimiterScanner;
use crate::error::BatchError;
use crate::pipeline::mover::Mover;
use crate::pipeline::report::{ReportPaths, write_reports};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub output_root: PathBuf,
    pub recursive: bool,
    pub dry_run: bool,
    /// Upper bound on files scanned at once by `run_batch_async`
    pub jobs: usize,
    pub delimiter: DelimiterScanner,
}

impl BatchOptions {
    pub fn new(input: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        BatchOptions {
            input: input.into(),
            output_root: output_root.into(),
            recursive: true,
            dry_run: false,
            jobs: 1,
            delimiter: DelimiterScanner::default(),
        }
    }

    /// Reject inputs that cannot work before any file is touched
    pub fn validate(&self) -> Result<(), BatchError> {
        if !self.input.exists() {
            return Err(BatchError::InputNotFound(self.input.clone()));
        }
        if self.output_root.exists() && !self.output_root.is_dir() {
            return Err(BatchError::InvalidOutputRoot(self.output_root.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Idle,
    Processing,
    Completed,
    Error,
}

/// Coarse progress snapshot handed to the caller's callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub status: BatchStatus,
    pub progress: usize,
    pub total: usize,
    pub message: String,
}

impl Default for BatchProgress {
    fn default() -> Self {
        BatchProgress {
            status: BatchStatus::Idle,
            progress: 0,
            total: 0,
            message: String::new(),
        }
    }
}

impl BatchProgress {
    fn processing(done: usize, total: usize) -> Self {
        BatchProgress {
            status: BatchStatus::Processing,
            progress: done,
            total,
            message: format!("Scanning {}/{}", (done + 1).min(total), total),
        }
    }

    fn completed(total: usize) -> Self {
        BatchProgress {
            status: BatchStatus::Completed,
            progress: total,
            total,
            message: "Done".to_string(),
        }
    }

    fn failed(total: usize, message: String) -> Self {
        BatchProgress {
            status: BatchStatus::Error,
            progress: 0,
            total,
            message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub formula_error: usize,
    pub no_error: usize,
    pub skipped: usize,
    pub copy_failures: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[MoveRecord]) -> Self {
        records.iter().fold(BatchSummary::default(), |mut summary, record| {
            match record.label {
                Label::FormulaError => summary.formula_error += 1,
                Label::NoError => summary.no_error += 1,
                Label::Skipped => summary.skipped += 1,
            }
            if !record.skipped && record.error.is_some() {
                summary.copy_failures += 1;
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.formula_error + self.no_error + self.skipped
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub records: Vec<MoveRecord>,
    pub summary: BatchSummary,
    pub reports: ReportPaths,
}

/// List candidate files in a stable order.
///
/// A file input is returned as-is whatever its extension (it will be reported
/// as skipped if it is not a .docx). A directory yields its `.docx` files,
/// descending into subdirectories when `recursive` is set.
pub fn discover(input: &Path, recursive: bool) -> Result<Vec<PathBuf>, BatchError> {
    if !input.exists() {
        return Err(BatchError::InputNotFound(input.to_path_buf()));
    }
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut walker = WalkDir::new(input).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(BatchError::Discovery {
                    path: input.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_file() && has_docx_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Scan, classify and relocate one file
pub fn process_file(scanner: &DocumentScanner, mover: &Mover, path: &Path) -> MoveRecord {
    debug!(file = %path.display(), "processing");
    mover.resolve(scanner.scan(path))
}

/// Process `files` in order and write the reports.
pub fn process_files<F>(
    files: &[PathBuf],
    options: &BatchOptions,
    mut on_progress: F,
) -> Result<BatchOutcome, BatchError>
where
    F: FnMut(&BatchProgress),
{
    let scanner = DocumentScanner::new(options.delimiter);
    let mover = Mover::new(&options.output_root, options.dry_run);
    let total = files.len();

    let mut records = Vec::with_capacity(total);
    for (done, path) in files.iter().enumerate() {
        on_progress(&BatchProgress::processing(done, total));
        records.push(process_file(&scanner, &mover, path));
    }

    finish(records, options, &mut on_progress)
}

/// Discover files under `options.input` and process them sequentially.
pub fn run_batch<F>(options: &BatchOptions, on_progress: F) -> Result<BatchOutcome, BatchError>
where
    F: FnMut(&BatchProgress),
{
    options.validate()?;
    let files = discover(&options.input, options.recursive)?;
    info!(files = files.len(), dry_run = options.dry_run, "starting batch");
    process_files(&files, options, on_progress)
}

/// Like [`run_batch`], but scans up to `options.jobs` files at once on the
/// blocking thread pool. Records are reported in discovery order regardless
/// of completion order.
pub async fn run_batch_async<F>(options: BatchOptions, mut on_progress: F) -> Result<BatchOutcome, BatchError>
where
    F: FnMut(&BatchProgress),
{
    options.validate()?;
    let files = discover(&options.input, options.recursive)?;
    let total = files.len();
    info!(files = total, jobs = options.jobs, dry_run = options.dry_run, "starting batch");

    let scanner = DocumentScanner::new(options.delimiter);
    let mover = Mover::new(&options.output_root, options.dry_run);
    let permits = Arc::new(Semaphore::new(options.jobs.max(1)));

    let mut tasks = tokio::task::JoinSet::new();
    for (index, path) in files.iter().cloned().enumerate() {
        let permits = Arc::clone(&permits);
        let mover = mover.clone();
        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = permits.acquire_owned().await.ok();
            let task_path = path.clone();
            let record = tokio::task::spawn_blocking(move || process_file(&scanner, &mover, &task_path))
                .await
                .unwrap_or_else(|err| failed_record(&path, err.to_string()));
            (index, record)
        });
    }

    let mut indexed: Vec<(usize, MoveRecord)> = Vec::with_capacity(total);
    if total > 0 {
        on_progress(&BatchProgress::processing(0, total));
    }
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(entry) => indexed.push(entry),
            Err(err) => error!("scan task failed: {err}"),
        }
        if indexed.len() < total {
            on_progress(&BatchProgress::processing(indexed.len(), total));
        }
    }

    // A task that died outside spawn_blocking leaves a gap; record it
    if indexed.len() < total {
        let seen: std::collections::HashSet<usize> = indexed.iter().map(|(i, _)| *i).collect();
        for (index, path) in files.iter().enumerate() {
            if !seen.contains(&index) {
                indexed.push((index, failed_record(path, "scan task aborted".to_string())));
            }
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    let records = indexed.into_iter().map(|(_, record)| record).collect();
    finish(records, &options, &mut on_progress)
}

/// Record for a file whose processing died unexpectedly
fn failed_record(path: &Path, message: String) -> MoveRecord {
    warn!(file = %path.display(), "processing failed: {message}");
    MoveRecord {
        input_path: path.to_string_lossy().to_string(),
        output_path: String::new(),
        label: Label::Skipped,
        matches: Vec::new(),
        skipped: true,
        error: Some(message),
    }
}

fn finish<F>(records: Vec<MoveRecord>, options: &BatchOptions, on_progress: &mut F) -> Result<BatchOutcome, BatchError>
where
    F: FnMut(&BatchProgress),
{
    let total = records.len();
    let reports = match write_reports(&records, &options.output_root) {
        Ok(paths) => paths,
        Err(err) => {
            on_progress(&BatchProgress::failed(total, err.to_string()));
            return Err(err.into());
        }
    };

    let summary = BatchSummary::from_records(&records);
    on_progress(&BatchProgress::completed(total));
    info!(
        formula_error = summary.formula_error,
        no_error = summary.no_error,
        skipped = summary.skipped,
        copy_failures = summary.copy_failures,
        "batch complete"
    );

    Ok(BatchOutcome {
        records,
        summary,
        reports,
    })
}
