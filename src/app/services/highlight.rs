use std::ops::Range;

use regex_lite::Regex;

use crate::app::domain::Rgb;
use crate::app::error::Result;

pub const KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "return", "if", "else", "elif", "for", "while", "try",
    "except",
];

/// Color applied to keyword matches.
pub const KEYWORD_COLOR: Rgb = Rgb::BLUE;

/// Whole-word, case-sensitive keyword matcher.
///
/// Purely cosmetic: matches are recolored on screen only and never written into
/// the document's stored formats.
pub struct KeywordHighlighter {
    rules: Vec<Regex>,
}

impl KeywordHighlighter {
    pub fn new() -> Result<Self> {
        let rules = KEYWORDS
            .iter()
            .map(|k| Regex::new(&format!(r"\b{}\b", k)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Byte ranges of every keyword match, sorted by start.
    ///
    /// Each line is scanned on its own, from scratch.
    pub fn highlight(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut offset = 0;
        for block in text.split_inclusive('\n') {
            for rule in &self.rules {
                spans.extend(
                    rule.find_iter(block)
                        .map(|m| offset + m.start()..offset + m.end()),
                );
            }
            offset += block.len();
        }
        spans.sort_by_key(|r| r.start);
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<Range<usize>> {
        KeywordHighlighter::new().unwrap().highlight(text)
    }

    #[test]
    fn test_def_colored_exactly() {
        assert_eq!(spans("def foo():"), vec![0..3]);
    }

    #[test]
    fn test_define_not_colored() {
        assert!(spans("define").is_empty());
        assert!(spans("undef").is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(spans("Def Class IMPORT").is_empty());
    }

    #[test]
    fn test_multiple_lines_offsets() {
        let text = "import os\nfrom x import y\n    return 1";
        assert_eq!(spans(text), vec![0..6, 10..14, 17..23, 30..36]);
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        assert_eq!(spans("(if)"), vec![1..3]);
        assert_eq!(spans("else:elif"), vec![0..4, 5..9]);
    }

    #[test]
    fn test_every_keyword_matches_alone() {
        let hl = KeywordHighlighter::new().unwrap();
        for k in KEYWORDS {
            assert_eq!(hl.highlight(k), vec![0..k.len()], "keyword {}", k);
        }
    }

    #[test]
    fn test_no_keywords_in_plain_prose() {
        assert!(spans("Dear team, the document is attached.").is_empty());
    }
}
