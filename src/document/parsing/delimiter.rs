//! Display-math delimiter detection
//!
//! Finds `$$...$$` spans in reconstructed paragraph text. A doubled marker
//! only counts when its first character is not preceded by the escape
//! character; no other context (templating braces, code) suppresses it.

use crate::document::models::{Match, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterScanner {
    pub marker: char,
    pub escape: char,
}

impl Default for DelimiterScanner {
    fn default() -> Self {
        DelimiterScanner {
            marker: '$',
            escape: '\\',
        }
    }
}

impl DelimiterScanner {
    pub fn new(marker: char, escape: char) -> Self {
        DelimiterScanner { marker, escape }
    }

    /// Character offsets of every unescaped doubled marker, left to right.
    ///
    /// Occurrences never overlap: `$$$$` yields offsets 0 and 2, and `$$$`
    /// only 0.
    pub fn find_markers(&self, text: &str) -> Vec<usize> {
        let chars: Vec<char> = text.chars().collect();
        let mut offsets = Vec::new();
        let mut i = 0;

        while i + 1 < chars.len() {
            let doubled = chars[i] == self.marker && chars[i + 1] == self.marker;
            let escaped = i > 0 && chars[i - 1] == self.escape;
            if doubled && !escaped {
                offsets.push(i);
                i += 2;
            } else {
                i += 1;
            }
        }

        offsets
    }

    /// Pair markers in order (first opens, second closes, and so on) and emit
    /// one match per pair. A trailing unpaired marker is ignored.
    pub fn scan_paragraph(&self, source: &str, paragraph: &Paragraph) -> Vec<Match> {
        let offsets = self.find_markers(&paragraph.text);
        if offsets.len() < 2 {
            return Vec::new();
        }

        let chars: Vec<char> = paragraph.text.chars().collect();
        offsets
            .chunks_exact(2)
            .map(|pair| {
                let (open, close) = (pair[0], pair[1]);
                Match {
                    text: chars[open..close + 2].iter().collect(),
                    paragraph_index: paragraph.index,
                    offset: open,
                    source: source.to_string(),
                }
            })
            .collect()
    }

    pub fn scan_paragraphs(&self, source: &str, paragraphs: &[Paragraph]) -> Vec<Match> {
        paragraphs
            .iter()
            .flat_map(|paragraph| self.scan_paragraph(source, paragraph))
            .collect()
    }
}
