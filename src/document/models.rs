//! Core data structures for scan results and their outcomes
//!
//! This module defines the public types that flow from scanning a document
//! through classification and relocation into the report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::ScanError;

/// A paragraph's reconstructed visible text and its position within a part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
}

/// One `$$...$$` span found in a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Captured text from the opening marker through the closing marker
    pub text: String,
    pub paragraph_index: usize,
    /// Character offset of the opening marker within the paragraph text
    pub offset: usize,
    /// Part name inside the container, e.g. `word/document.xml`
    pub source: String,
}

#[derive(Debug)]
pub struct ScanResult {
    pub file_path: PathBuf,
    pub matches: Vec<Match>,
    pub is_error: bool,
    pub skipped: bool,
    /// Why the file was skipped, kept for logging
    pub skip_reason: Option<ScanError>,
}

impl ScanResult {
    pub fn scanned(file_path: PathBuf, matches: Vec<Match>) -> Self {
        let is_error = !matches.is_empty();
        ScanResult {
            file_path,
            matches,
            is_error,
            skipped: false,
            skip_reason: None,
        }
    }

    pub fn skipped(file_path: PathBuf, reason: ScanError) -> Self {
        ScanResult {
            file_path,
            matches: Vec::new(),
            is_error: false,
            skipped: true,
            skip_reason: Some(reason),
        }
    }
}

/// Classification outcome for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    FormulaError,
    NoError,
    Skipped,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::FormulaError => "formula_error",
            Label::NoError => "no_error",
            Label::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The durable outcome of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub input_path: String,
    /// Empty when the file was skipped or the copy failed
    pub output_path: String,
    pub label: Label,
    pub matches: Vec<Match>,
    pub skipped: bool,
    /// Copy failure message; the record keeps its classification label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoveRecord {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}
