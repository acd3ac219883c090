//! Relocation of scanned files into their label's destination root
//!
//! Files are copied, never renamed away from their input location, and a
//! file already present at the destination is overwritten.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::document::models::{Label, MoveRecord, ScanResult};
use crate::error::FileOperationError;
use crate::pipeline::classify::classify_result;

#[derive(Debug, Clone)]
pub struct Mover {
    output_root: PathBuf,
    dry_run: bool,
}

impl Mover {
    pub fn new(output_root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Mover {
            output_root: output_root.into(),
            dry_run,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Destination directory for a label; skipped files stay where they are
    pub fn destination_dir(&self, label: Label) -> Option<PathBuf> {
        match label {
            Label::FormulaError | Label::NoError => Some(self.output_root.join(label.as_str())),
            Label::Skipped => None,
        }
    }

    /// Full destination path for `path` under `label`, without touching disk
    pub fn destination_for(&self, path: &Path, label: Label) -> Option<PathBuf> {
        let file_name = path.file_name()?;
        self.destination_dir(label).map(|dir| dir.join(file_name))
    }

    /// Copy `path` into its label's destination, or only compute the target
    /// in dry-run mode.
    pub fn relocate(&self, path: &Path, label: Label) -> Result<Option<PathBuf>, FileOperationError> {
        let Some(destination) = self.destination_for(path, label) else {
            return Ok(None);
        };
        if self.dry_run {
            return Ok(Some(destination));
        }

        let copy = || -> std::io::Result<()> {
            if let Some(dir) = destination.parent() {
                // create_dir_all tolerates a concurrent creator
                fs::create_dir_all(dir)?;
            }
            fs::copy(path, &destination)?;
            Ok(())
        };
        copy().map_err(|source| FileOperationError {
            from: path.to_path_buf(),
            to: destination.clone(),
            source,
        })?;

        Ok(Some(destination))
    }

    /// Classify a scan result, relocate the file and produce its record.
    /// A failed copy is recorded on the record rather than returned.
    pub fn resolve(&self, result: ScanResult) -> MoveRecord {
        let label = classify_result(&result);
        let input_path = result.file_path.to_string_lossy().to_string();

        let (output_path, error) = match self.relocate(&result.file_path, label) {
            Ok(Some(destination)) => {
                if self.dry_run {
                    info!(file = %input_path, label = %label, "would move to {}", destination.display());
                } else {
                    info!(file = %input_path, label = %label, "moved to {}", destination.display());
                }
                (destination.to_string_lossy().to_string(), None)
            }
            Ok(None) => {
                debug!(file = %input_path, "not relocated");
                (String::new(), None)
            }
            Err(err) => {
                warn!(file = %input_path, label = %label, "{err}");
                (String::new(), Some(err.to_string()))
            }
        };

        MoveRecord {
            input_path,
            output_path,
            label,
            matches: result.matches,
            skipped: result.skipped,
            error,
        }
    }
}
