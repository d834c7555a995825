//! List-item splitter keyed by enumeration-marker patterns

use super::text::LEADING_MARKER;

/// Split a section into enumerated items.
///
/// A matched item keeps its marker and spans continuation lines; a blank
/// line or the next marker ends it. Unmarked lines before the first
/// marker are dropped. Returns an empty vec when no marker matches,
/// handing control to the fallback chain.
pub fn split_marked_items(text: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if LEADING_MARKER.is_match(line) {
            if let Some(item) = current.take() {
                push_trimmed(&mut items, item);
            }
            current = Some(line.trim().to_string());
        } else if line.trim().is_empty() {
            if let Some(item) = current.take() {
                push_trimmed(&mut items, item);
            }
        } else if let Some(item) = current.as_mut() {
            item.push('\n');
            item.push_str(line.trim_end());
        }
    }

    if let Some(item) = current {
        push_trimmed(&mut items, item);
    }

    items
}

/// Split a section into trimmed, non-blank lines
pub fn split_line_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a section on commas into trimmed, non-empty items
pub fn split_comma_items(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_trimmed(items: &mut Vec<String>, item: String) {
    let trimmed = item.trim().to_string();
    if !trimmed.is_empty() {
        items.push(trimmed);
    }
}
