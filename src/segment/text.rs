//! Shared text utilities for the response segmenter

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();
    // Digit markers and the bullet character may run straight into the
    // item text; "*" and "-" require a following space so expressions
    // like "-5x" are not mistaken for bullets.
    pub(super) static ref LEADING_MARKER: Regex =
        Regex::new(r"^\s*(?:\d+[.)]\s*|•\s*|[*-]\s+)").unwrap();
}

/// Count whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text on blank lines into trimmed, non-empty paragraphs
pub fn paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// First paragraph of the text, if any
pub fn first_paragraph(text: &str) -> Option<String> {
    paragraphs(text).into_iter().next()
}

/// Strip a leading enumeration marker (digit-dot, digit-paren, bullet) from a line
pub fn strip_marker(line: &str) -> &str {
    match LEADING_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line.trim_start(),
    }
}

/// Truncate to at most `max_chars` characters on a char boundary
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
