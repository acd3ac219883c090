mod common;

use common::{part_xml, write_docx, write_docx_parts};
use docx_formula_mover::document::{Label, scan};
use docx_formula_mover::pipeline::{Mover, classify};
use docx_formula_mover::ScanError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_display_math_is_flagged() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "has_display_math.docx", &[&["$$A=1$$"]]);

    let result = scan(&path);
    assert!(result.is_error);
    assert!(!result.skipped);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].text, "$$A=1$$");
    assert_eq!(result.matches[0].source, "word/document.xml");
    assert_eq!(classify(result.skipped, &result.matches), Label::FormulaError);

    let mover = Mover::new(dir.path().join("out"), true);
    let record = mover.resolve(result);
    assert!(record.output_path.ends_with("has_display_math.docx"));
    assert!(
        record.output_path.contains("formula_error"),
        "unexpected destination {}",
        record.output_path
    );
}

#[test]
fn test_escaped_dollars_are_clean() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "escaped_dollar.docx",
        &[
            &[r"Here is an escaped dollar: \$ $100"],
            &[r"And another: \$$ not display math"],
        ],
    );

    let result = scan(&path);
    assert!(!result.is_error);
    assert!(result.matches.is_empty());
    assert_eq!(classify(result.skipped, &result.matches), Label::NoError);
}

#[test]
fn test_inline_math_is_clean() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "inline_math_only.docx",
        &[&["This is inline math $x+y$ which is fine."]],
    );

    let result = scan(&path);
    assert!(!result.is_error);
    assert_eq!(classify(result.skipped, &result.matches), Label::NoError);
}

#[test]
fn test_markers_split_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "split_runs_display.docx",
        &[&["$", "$", "B=2", "$", "$"]],
    );

    let result = scan(&path);
    assert!(result.is_error);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].text, "$$B=2$$");
    assert_eq!(result.matches[0].offset, 0);
}

#[test]
fn test_fragmentation_gives_same_matches() {
    let dir = TempDir::new().unwrap();
    let whole = write_docx(dir.path(), "whole.docx", &[&["intro"], &["Sum: $$a+b$$ done"]]);
    let split = write_docx(
        dir.path(),
        "split.docx",
        &[&["in", "tro"], &["Sum: $", "$a", "+b$", "$ done"]],
    );

    assert_eq!(scan(&whole).matches, scan(&split).matches);
}

#[test]
fn test_non_docx_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("not_a_docx.txt");
    fs::write(&path, "$$A=1$$").unwrap();

    let result = scan(&path);
    assert!(result.skipped);
    assert!(!result.is_error);
    assert!(matches!(result.skip_reason, Some(ScanError::UnsupportedFile(_))));

    let mover = Mover::new(dir.path().join("out"), false);
    let record = mover.resolve(result);
    assert_eq!(record.label, Label::Skipped);
    assert!(record.output_path.is_empty());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_corrupt_container_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    fs::write(&path, "this is not a zip archive").unwrap();

    let result = scan(&path);
    assert!(result.skipped);
    assert!(!result.is_error);
    assert!(matches!(result.skip_reason, Some(ScanError::CorruptArchive(_))));
}

#[test]
fn test_malformed_part_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_docx_parts(
        dir.path(),
        "malformed.docx",
        &[("word/document.xml", "<w:document><w:body>".to_string())],
    );

    let result = scan(&path);
    assert!(result.skipped);
    assert!(matches!(result.skip_reason, Some(ScanError::MalformedPart { .. })));
}

#[test]
fn test_headers_footers_and_notes_are_scanned() {
    let dir = TempDir::new().unwrap();
    let path = write_docx_parts(
        dir.path(),
        "parts.docx",
        &[
            ("word/document.xml", part_xml("w:document", &[&["clean body"]])),
            ("word/header2.xml", part_xml("w:hdr", &[&["$$h$$"]])),
            ("word/footer1.xml", part_xml("w:ftr", &[&["page"], &["$$f$$"]])),
            ("word/footnotes.xml", part_xml("w:footnotes", &[&["$$n$$"]])),
            ("word/endnotes.xml", part_xml("w:endnotes", &[&["$$e$$"]])),
            ("word/comments.xml", part_xml("w:comments", &[&["$$ignored$$"]])),
        ],
    );

    let result = scan(&path);
    let found: Vec<(&str, usize, &str)> = result
        .matches
        .iter()
        .map(|m| (m.source.as_str(), m.paragraph_index, m.text.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("word/header2.xml", 0, "$$h$$"),
            ("word/footer1.xml", 1, "$$f$$"),
            ("word/footnotes.xml", 0, "$$n$$"),
            ("word/endnotes.xml", 0, "$$e$$"),
        ]
    );
}

#[test]
fn test_uppercase_extension_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "LOUD.DOCX", &[&["$$x$$"]]);
    let result = scan(&path);
    assert!(!result.skipped);
    assert!(result.is_error);
}
