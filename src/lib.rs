//! docx-formula-mover: sort .docx files by unescaped display math
//!
//! This library scans Word documents for `$$...$$` display-math spans in their
//! visible text, copies each file into a `formula_error` or `no_error`
//! directory, and writes JSON and CSV reports of the outcome.

pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use document::{DocumentScanner, Label, Match, MoveRecord, ScanResult, scan};
pub use error::{BatchError, FileOperationError, ScanError};
pub use pipeline::{BatchOptions, BatchProgress, BatchStatus, Mover, run_batch, run_batch_async};
