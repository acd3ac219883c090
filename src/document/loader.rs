//! Document scanning
//!
//! `scan()` is the per-file entry point: it checks the file type, opens the
//! container, reconstructs every target part's paragraphs and collects the
//! display-math matches. Any failure becomes a skipped `ScanResult`, so
//! callers never see an error from here.

use std::path::Path;
use tracing::{debug, warn};

use super::io::{DocxArchive, PartSource};
use super::models::{Match, ScanResult};
use super::parsing::delimiter::DelimiterScanner;
use super::parsing::paragraph::extract_paragraphs;
use crate::error::ScanError;

/// Scan a file with the default `$$` / `\` delimiters
pub fn scan(path: &Path) -> ScanResult {
    DocumentScanner::default().scan(path)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentScanner {
    pub delimiter: DelimiterScanner,
}

impl DocumentScanner {
    pub fn new(delimiter: DelimiterScanner) -> Self {
        DocumentScanner { delimiter }
    }

    pub fn scan(&self, path: &Path) -> ScanResult {
        match self.try_scan(path) {
            Ok(matches) => {
                debug!(file = %path.display(), matches = matches.len(), "scanned");
                ScanResult::scanned(path.to_path_buf(), matches)
            }
            Err(err) => {
                match &err {
                    ScanError::UnsupportedFile(_) => debug!(file = %path.display(), "skipping: {err}"),
                    _ => warn!(file = %path.display(), "skipping: {err}"),
                }
                ScanResult::skipped(path.to_path_buf(), err)
            }
        }
    }

    fn try_scan(&self, path: &Path) -> Result<Vec<Match>, ScanError> {
        if !has_docx_extension(path) {
            return Err(ScanError::UnsupportedFile(path.to_path_buf()));
        }

        // The archive handle is dropped when this function returns
        let mut archive: DocxArchive = DocxArchive::open(path)?;
        self.scan_parts(&mut archive)
    }

    /// Collect matches from every target part of `source`, in part order
    pub fn scan_parts<S: PartSource>(&self, source: &mut S) -> Result<Vec<Match>, ScanError> {
        let mut matches = Vec::new();
        for part in source.list_parts() {
            let xml = source.read_part(&part)?;
            let paragraphs = extract_paragraphs(&part, &xml)?;
            matches.extend(self.delimiter.scan_paragraphs(&part, &paragraphs));
        }
        Ok(matches)
    }
}

pub(crate) fn has_docx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}
