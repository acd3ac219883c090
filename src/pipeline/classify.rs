use crate::document::models::{Label, Match, ScanResult};

/// Label a file from its skip flag and aggregated matches. Skipping wins over
/// everything else.
pub fn classify(skipped: bool, matches: &[Match]) -> Label {
    if skipped {
        Label::Skipped
    } else if !matches.is_empty() {
        Label::FormulaError
    } else {
        Label::NoError
    }
}

pub fn classify_result(result: &ScanResult) -> Label {
    classify(result.skipped, &result.matches)
}
