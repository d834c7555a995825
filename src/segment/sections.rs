//! Section splitter keyed by heading-synonym tables
//!
//! A heading line is a known keyword (case-insensitive) at the start of a
//! line, optionally wrapped in markdown decoration, followed by a colon.
//! A bare keyword with nothing else on the line also counts, since models
//! frequently emit headings without punctuation. Everything after a heading
//! belongs to its section until the next known heading or end of input.

use std::collections::HashMap;

/// Maps a set of heading synonyms onto one named result field.
///
/// Synonyms are matched in order, so longer variants must come first
/// ("Detailed Solution" before "Solution").
pub struct HeadingRule {
    pub field: &'static str,
    pub synonyms: &'static [&'static str],
}

/// Heading table for assignment responses
pub const ASSIGNMENT_RULES: &[HeadingRule] = &[
    HeadingRule {
        field: "solution",
        synonyms: &["Detailed Solution", "Solution", "Answer"],
    },
    HeadingRule {
        field: "steps",
        synonyms: &["Step-by-Step Explanation", "Step-by-Step", "Steps", "Explanation"],
    },
    HeadingRule {
        field: "concepts",
        synonyms: &["Key Concepts Used", "Key Concepts", "Concepts Used", "Important Concepts"],
    },
    HeadingRule {
        field: "resources",
        synonyms: &["Additional Resources", "Resources", "References"],
    },
];

/// Heading table for document-analysis responses
pub const DOCUMENT_RULES: &[HeadingRule] = &[
    HeadingRule {
        field: "summary",
        synonyms: &["Comprehensive Summary", "Summary"],
    },
    HeadingRule {
        field: "key_points",
        synonyms: &["Key Points"],
    },
    HeadingRule {
        field: "topics",
        synonyms: &["Main Topics", "Topics"],
    },
    HeadingRule {
        field: "suggestions",
        synonyms: &["Suggestions for Improvement", "Suggestions", "Improvements"],
    },
];

/// Result of splitting a response into headed sections
#[derive(Debug, Default)]
pub struct SectionMap {
    /// Text before the first recognized heading
    pub preamble: String,
    sections: HashMap<&'static str, String>,
}

impl SectionMap {
    /// Trimmed section body for a field, if the heading was found
    /// and captured any text
    pub fn get(&self, field: &str) -> Option<&str> {
        self.sections
            .get(field)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Split a response into sections according to a heading table
pub fn split_sections(response: &str, rules: &[HeadingRule]) -> SectionMap {
    let mut map = SectionMap::default();
    let mut current: Option<&'static str> = None;

    for line in response.lines() {
        if let Some((field, rest)) = match_heading(line, rules) {
            current = Some(field);
            let buf = map.sections.entry(field).or_default();
            if !rest.is_empty() {
                buf.push_str(rest);
                buf.push('\n');
            }
        } else {
            match current {
                Some(field) => {
                    let buf = map.sections.entry(field).or_default();
                    buf.push_str(line);
                    buf.push('\n');
                }
                None => {
                    map.preamble.push_str(line);
                    map.preamble.push('\n');
                }
            }
        }
    }

    map
}

/// Try to interpret a line as a known heading.
///
/// Returns the matched field plus any text trailing the colon on the
/// same line.
fn match_heading<'a>(line: &'a str, rules: &[HeadingRule]) -> Option<(&'static str, &'a str)> {
    let stripped = strip_decoration(line);

    for rule in rules {
        for synonym in rule.synonyms {
            if let Some(rest) = strip_keyword(stripped, synonym) {
                let rest = rest.trim_start();
                if let Some(after_colon) = rest.strip_prefix(':') {
                    return Some((rule.field, after_colon.trim().trim_end_matches("**").trim()));
                }
                // Bare keyword on a line of its own (allowing trailing markdown)
                if rest.trim_end_matches('*').trim().is_empty() {
                    return Some((rule.field, ""));
                }
            }
        }
    }

    None
}

/// Strip leading markdown/enumeration decoration from a heading line:
/// `## `, `**`, `1. `, `- `
fn strip_decoration(line: &str) -> &str {
    let mut s = line.trim_start();

    s = s.trim_start_matches('#').trim_start();

    // A single leading enumeration marker ("3. Key Concepts")
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &s[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            s = rest.trim_start();
        }
    }

    s.trim_start_matches(['*', '-']).trim_start()
}

/// Case-insensitive prefix match, returning the remainder of the line
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&line[keyword.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_sections() {
        let response = "Solution:\nx = 4\n\nStep-by-Step:\n1. Apply formula\n2. Substitute values";
        let map = split_sections(response, ASSIGNMENT_RULES);

        assert_eq!(map.get("solution"), Some("x = 4"));
        assert_eq!(map.get("steps"), Some("1. Apply formula\n2. Substitute values"));
        assert_eq!(map.get("concepts"), None);
    }

    #[test]
    fn test_heading_synonyms() {
        let response = "Answer: 42\n\nExplanation:\nBecause.";
        let map = split_sections(response, ASSIGNMENT_RULES);

        assert_eq!(map.get("solution"), Some("42"));
        assert_eq!(map.get("steps"), Some("Because."));
    }

    #[test]
    fn test_longer_synonym_wins() {
        let response = "Detailed Solution:\nthe work";
        let map = split_sections(response, ASSIGNMENT_RULES);
        assert_eq!(map.get("solution"), Some("the work"));
    }

    #[test]
    fn test_markdown_decorated_headings() {
        let response = "## 1. Solution\nx = 2\n\n**Key Concepts:**\nAlgebra";
        let map = split_sections(response, ASSIGNMENT_RULES);

        assert_eq!(map.get("solution"), Some("x = 2"));
        assert_eq!(map.get("concepts"), Some("Algebra"));
    }

    #[test]
    fn test_case_insensitive() {
        let response = "SOLUTION: done";
        let map = split_sections(response, ASSIGNMENT_RULES);
        assert_eq!(map.get("solution"), Some("done"));
    }

    #[test]
    fn test_keyword_inside_sentence_is_not_heading() {
        let response = "The answer is 42 because of simple arithmetic.";
        let map = split_sections(response, ASSIGNMENT_RULES);

        assert!(map.is_empty());
        assert_eq!(map.preamble.trim(), response);
    }

    #[test]
    fn test_bare_keyword_without_colon_must_end_line() {
        // A sentence starting with a keyword is not a heading
        let response = "Answer the following question carefully.";
        let map = split_sections(response, ASSIGNMENT_RULES);
        assert!(map.is_empty());

        // But the keyword alone on a line is
        let response = "Answer\n42";
        let map = split_sections(response, ASSIGNMENT_RULES);
        assert_eq!(map.get("solution"), Some("42"));
    }

    #[test]
    fn test_empty_input() {
        let map = split_sections("", ASSIGNMENT_RULES);
        assert!(map.is_empty());
        assert!(map.preamble.is_empty());
    }

    #[test]
    fn test_document_rules() {
        let response = "Summary:\nA short text.\n\nKey Points:\n- one\n- two\n\nMain Topics: math, logic\n\nSuggestions:\n1. tighten prose";
        let map = split_sections(response, DOCUMENT_RULES);

        assert_eq!(map.get("summary"), Some("A short text."));
        assert_eq!(map.get("key_points"), Some("- one\n- two"));
        assert_eq!(map.get("topics"), Some("math, logic"));
        assert_eq!(map.get("suggestions"), Some("1. tighten prose"));
    }
}
