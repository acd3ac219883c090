//! Document scanning module
//!
//! This module opens .docx containers, rebuilds paragraph text from the
//! text-bearing parts and finds display-math delimiters in it.

pub mod io;
pub mod loader;
pub mod models;
pub mod parsing;

pub use io::{DocxArchive, PartSource};
pub use loader::{DocumentScanner, scan};
pub use models::*;
