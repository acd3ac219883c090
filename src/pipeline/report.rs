//! Report writing
//!
//! Each run replaces `report.json` (full match detail) and `report.csv` (one
//! summary row per file) in the output root.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::document::models::{Label, MoveRecord};
use crate::error::ReportError;

pub const JSON_REPORT: &str = "report.json";
pub const CSV_REPORT: &str = "report.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Flattened row of the CSV report; field order is the header order
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    input_path: &'a str,
    output_path: &'a str,
    label: Label,
    skipped: bool,
    match_count: usize,
}

impl<'a> From<&'a MoveRecord> for CsvRow<'a> {
    fn from(record: &'a MoveRecord) -> Self {
        CsvRow {
            input_path: &record.input_path,
            output_path: &record.output_path,
            label: record.label,
            skipped: record.skipped,
            match_count: record.match_count(),
        }
    }
}

pub fn write_reports(records: &[MoveRecord], output_root: &Path) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(output_root)?;

    let paths = ReportPaths {
        json: output_root.join(JSON_REPORT),
        csv: output_root.join(CSV_REPORT),
    };

    write_json(records, &paths.json)?;
    write_csv(records, &paths.csv)?;

    info!(
        records = records.len(),
        "reports written to {}",
        output_root.display()
    );
    Ok(paths)
}

fn write_json(records: &[MoveRecord], path: &Path) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_csv(records: &[MoveRecord], path: &Path) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    // Written explicitly so an empty run still gets a header row
    writer.write_record(["input_path", "output_path", "label", "skipped", "match_count"])?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}
