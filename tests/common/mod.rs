//! Builders for small .docx fixtures written into temporary directories

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::{CompressionMethod, ZipWriter};
use zip::write::SimpleFileOptions;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// One paragraph, given as the text of each run
pub type RunTexts<'a> = &'a [&'a str];

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Markup for a part whose paragraphs are made of the given runs
pub fn part_xml(root: &str, paragraphs: &[RunTexts]) -> String {
    let mut body = String::new();
    for runs in paragraphs {
        body.push_str("<w:p>");
        for text in runs.iter() {
            body.push_str(&format!(
                r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape(text)
            ));
        }
        body.push_str("</w:p>");
    }
    let inner = if root == "w:document" {
        format!("<w:body>{body}</w:body>")
    } else {
        body
    };
    format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><{root} xmlns:w="{W_NS}">{inner}</{root}>"#)
}

/// Write a container with the given raw entries
pub fn write_docx_parts(dir: &Path, name: &str, entries: &[(&str, String)]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    for (entry, content) in entries {
        zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// Write a document whose main part holds the given paragraphs
pub fn write_docx(dir: &Path, name: &str, paragraphs: &[RunTexts]) -> PathBuf {
    write_docx_parts(
        dir,
        name,
        &[("word/document.xml", part_xml("w:document", paragraphs))],
    )
}

/// Write a stored (uncompressed) document whose central directory claims
/// `declared` bytes of uncompressed data for every entry
pub fn write_docx_with_declared_size(
    dir: &Path,
    name: &str,
    paragraphs: &[RunTexts],
    declared: u32,
) -> PathBuf {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(part_xml("w:document", paragraphs).as_bytes())
        .unwrap();
    let mut bytes = zip.finish().unwrap().into_inner();

    // Central directory file header: signature, then uncompressed size at +24
    const CENTRAL_HEADER: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];
    let headers: Vec<usize> = bytes
        .windows(4)
        .enumerate()
        .filter(|(_, window)| *window == CENTRAL_HEADER)
        .map(|(at, _)| at)
        .collect();
    assert!(!headers.is_empty());
    for at in headers {
        bytes[at + 24..at + 28].copy_from_slice(&declared.to_le_bytes());
    }

    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
