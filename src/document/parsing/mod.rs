//! Markup and text parsing
//!
//! `paragraph` turns part markup into paragraph text; `delimiter` finds
//! display-math spans in that text.

pub mod delimiter;
pub(crate) mod paragraph;

pub use delimiter::DelimiterScanner;
