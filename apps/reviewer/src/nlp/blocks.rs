//! Layout splitting ahead of sentence segmentation.
//!
//! Extracted résumé text carries structure the sentence splitter cannot see: a
//! blank line or a bullet starts a new unit even without terminal punctuation.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Bullet glyphs anywhere, or `-`/`*` opening a line.
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[•▪◦●‣∙]|^[ \t]*([-*])").unwrap());

/// A trimmed slice of the input and its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub offset: usize,
    pub text: &'a str,
}

/// Cuts `text` at blank lines and before every bullet. Blank blocks are dropped.
pub fn split_blocks(text: &str) -> Vec<Block<'_>> {
    let mut cuts: Vec<usize> = BLANK_LINE.find_iter(text).map(|m| m.end()).collect();
    cuts.extend(
        BULLET
            .captures_iter(text)
            .filter_map(|c| c.get(1).or_else(|| c.get(0)))
            .map(|m| m.start()),
    );
    cuts.push(text.len());
    cuts.sort_unstable();
    cuts.dedup();

    let mut blocks = Vec::new();
    let mut start = 0;
    for cut in cuts {
        let raw = &text[start..cut];
        let leading = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            blocks.push(Block {
                offset: start + leading,
                text: trimmed,
            });
        }
        start = cut;
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<&str> {
        split_blocks(text).into_iter().map(|b| b.text).collect()
    }

    #[test]
    fn test_blank_line_splits() {
        assert_eq!(
            texts("Experience\n\nSoftware Engineer at Acme"),
            vec!["Experience", "Software Engineer at Acme"]
        );
    }

    #[test]
    fn test_single_newline_does_not_split() {
        assert_eq!(texts("Designed the payment\nplatform.").len(), 1);
    }

    #[test]
    fn test_bullets_open_blocks() {
        assert_eq!(
            texts("Skills\n• Rust\n• Python\n- Go"),
            vec!["Skills", "• Rust", "• Python", "- Go"]
        );
    }

    #[test]
    fn test_inline_hyphen_is_not_bullet() {
        assert_eq!(texts("Built a real-time system"), vec!["Built a real-time system"]);
    }

    #[test]
    fn test_offsets_index_into_input() {
        let text = "  Summary\n \n  ▪ Led teams\n   * Shipped";
        for block in split_blocks(text) {
            assert_eq!(&text[block.offset..block.offset + block.text.len()], block.text);
        }
    }

    #[test]
    fn test_whitespace_has_no_blocks() {
        assert!(split_blocks("   \n\n ").is_empty());
    }
}
