//! Container access
//!
//! This module opens a .docx zip container and exposes the text-bearing parts
//! through the [`PartSource`] capability, so the text and delimiter logic never
//! touches `zip` directly.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ScanError;

pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

static AUXILIARY_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^word/(header|footer|footnotes|endnotes)\d*\.xml$")
        .expect("part name pattern is valid")
});

/// Read access to the named markup parts of a document
pub trait PartSource {
    /// Names of the parts worth scanning, main document first
    fn list_parts(&self) -> Vec<String>;

    fn read_part(&mut self, name: &str) -> Result<Vec<u8>, ScanError>;
}

/// Whether a container entry is one of the scanned text-bearing parts
pub fn is_target_part(name: &str) -> bool {
    name == MAIN_DOCUMENT_PART || AUXILIARY_PART.is_match(name)
}

/// An opened .docx container
pub struct DocxArchive<R: Read + Seek = File> {
    archive: ZipArchive<R>,
}

impl DocxArchive<File> {
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> DocxArchive<R> {
    pub fn from_reader(reader: R) -> Result<Self, ScanError> {
        let archive = ZipArchive::new(reader).map_err(ScanError::CorruptArchive)?;
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> PartSource for DocxArchive<R> {
    fn list_parts(&self) -> Vec<String> {
        let mut parts: Vec<String> = Vec::new();
        if self.archive.file_names().any(|name| name == MAIN_DOCUMENT_PART) {
            parts.push(MAIN_DOCUMENT_PART.to_string());
        }
        parts.extend(
            self.archive
                .file_names()
                .filter(|name| AUXILIARY_PART.is_match(name))
                .map(str::to_string),
        );
        parts
    }

    fn read_part(&mut self, name: &str) -> Result<Vec<u8>, ScanError> {
        let mut entry = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => ScanError::processing(name, "part not found in container"),
            other => ScanError::processing(name, other),
        })?;

        // The declared size comes from the central directory and is not trusted
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| ScanError::processing(name, e))?;
        Ok(content)
    }
}
