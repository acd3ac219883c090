//! Paragraph text reconstruction
//!
//! Word splits a paragraph's visible text across runs (`w:r`) whenever
//! formatting, spell-check state or revision marks change, so a `$$` typed in
//! one go can end up as `$` + `$` in two runs. Text is therefore collected per
//! paragraph from every `w:t` leaf below it, ignoring run boundaries.

use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;

use crate::document::models::Paragraph;
use crate::error::ScanError;

/// WordprocessingML main namespace
pub const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn is_wordml(ns: &ResolveResult, local: &[u8], expected: &[u8]) -> bool {
    matches!(ns, ResolveResult::Bound(n) if n.0 == WORDML_NS) && local == expected
}

/// Extract the non-empty paragraphs of one part, in document order.
///
/// `Paragraph::index` counts every `w:p` start tag, including paragraphs
/// that end up empty and are dropped. Nested paragraphs (text boxes) add
/// their text to each enclosing paragraph as well as to their own entry.
pub(crate) fn extract_paragraphs(part: &str, xml: &[u8]) -> Result<Vec<Paragraph>, ScanError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false); // Whitespace inside w:t is visible text

    let mut buf = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut open_paragraphs: Vec<usize> = Vec::new();
    let mut text_depth = 0usize;
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut root_closed = false;

    loop {
        buf.clear();
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| ScanError::malformed(part, e))?;

        if root_closed && is_content(&event) {
            return Err(ScanError::malformed(part, "content after root element"));
        }

        match event {
            Event::Start(ref e) => {
                seen_root = true;
                depth += 1;
                let local = e.local_name();
                if is_wordml(&ns, local.as_ref(), b"p") {
                    open_paragraphs.push(texts.len());
                    texts.push(String::new());
                } else if is_wordml(&ns, local.as_ref(), b"t") {
                    text_depth += 1;
                }
            }
            Event::Empty(ref e) => {
                seen_root = true;
                root_closed = depth == 0;
                if is_wordml(&ns, e.local_name().as_ref(), b"p") {
                    texts.push(String::new());
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
                let local = e.local_name();
                if is_wordml(&ns, local.as_ref(), b"p") {
                    open_paragraphs.pop();
                } else if is_wordml(&ns, local.as_ref(), b"t") {
                    text_depth = text_depth.saturating_sub(1);
                }
            }
            Event::Text(ref e) if text_depth > 0 => {
                let text = e.unescape().map_err(|err| ScanError::malformed(part, err))?;
                append_to_open(&mut texts, &open_paragraphs, &text);
            }
            Event::CData(ref e) if text_depth > 0 => {
                let text = std::str::from_utf8(e).map_err(|err| ScanError::malformed(part, err))?;
                append_to_open(&mut texts, &open_paragraphs, text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ScanError::malformed(part, "no root element"));
    }
    if depth != 0 {
        return Err(ScanError::malformed(part, "unexpected end of document"));
    }

    Ok(texts
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.is_empty())
        .map(|(index, text)| Paragraph { index, text })
        .collect())
}

/// Events that may not follow the root element's end
fn is_content(event: &Event) -> bool {
    match event {
        Event::Start(_) | Event::Empty(_) | Event::CData(_) => true,
        Event::Text(e) => e.iter().any(|b| !b.is_ascii_whitespace()),
        _ => false,
    }
}

fn append_to_open(texts: &mut [String], open_paragraphs: &[usize], fragment: &str) {
    for &index in open_paragraphs {
        texts[index].push_str(fragment);
    }
}
