//! Classification, relocation and reporting of scanned files

pub mod batch;
pub mod classify;
pub mod mover;
pub mod report;

pub use batch::{
    BatchOptions, BatchOutcome, BatchProgress, BatchStatus, BatchSummary, discover, run_batch,
    run_batch_async,
};
pub use classify::classify;
pub use mover::Mover;
pub use report::{ReportPaths, write_reports};
