//! Response segmenter: converts one free-text model response into one
//! fully-populated structured result
//!
//! Composition per tool: the section splitter locates headed regions,
//! the item splitter enumerates list fields, and the fallback policy
//! fills whatever the response never produced. Pure and total: the same
//! input always yields the same output, and no input can make it fail.

pub mod fallback;
pub mod items;
pub mod sections;
pub mod text;

use crate::tools::results::*;
use fallback::*;
use items::{split_comma_items, split_line_items, split_marked_items};
use sections::{split_sections, ASSIGNMENT_RULES, DOCUMENT_RULES};
use text::{char_prefix, first_paragraph, strip_marker, word_count};

/// Marker the grammar prompt asks the model to emit between the list of
/// corrections and the corrected text
const CORRECTED_TEXT_MARKER: &str = "\n\nCorrected Text:\n";

/// Segment a rewrite response. The rewritten text is the whole response;
/// improvements are a fixed list and the word count is computed locally.
pub fn rewrite(response: &str) -> RewriteResult {
    RewriteResult {
        rewritten_text: response.to_string(),
        improvements: REWRITE_IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        readability_score: "Professional".to_string(),
        word_count: word_count(response),
    }
}

/// Segment a paraphrase response. Lengths are whitespace-token counts of
/// the original input and the response.
pub fn paraphrase(response: &str, original: &str) -> ParaphraseResult {
    ParaphraseResult {
        paraphrased_text: response.to_string(),
        changes: PARAPHRASE_CHANGES.iter().map(|s| s.to_string()).collect(),
        original_length: word_count(original),
        new_length: word_count(response),
    }
}

/// Segment a grammar response: corrections before the "Corrected Text:"
/// marker, corrected text after it. Without the marker the whole response
/// stands in for the corrected text.
pub fn grammar(response: &str) -> GrammarResult {
    let (corrections_part, corrected_text) = match response.split_once(CORRECTED_TEXT_MARKER) {
        Some((before, after)) => (before, after.to_string()),
        None => (response, response.to_string()),
    };

    let corrections = split_line_items(corrections_part);
    let count = corrections.len();

    GrammarResult {
        corrected_text,
        corrections,
        error_count: count,
        suggestion_count: count,
        readability_improvement: "Enhanced".to_string(),
    }
}

/// Segment an equation response: the whole response is the worked solution.
pub fn equation(response: &str) -> EquationResult {
    EquationResult {
        solution: response.to_string(),
    }
}

/// Segment a document-analysis response.
///
/// Heading-based when the response carries recognizable headings, else a
/// positional paragraph split (summary, key points, topics, suggestions in
/// order). List fields have their bullet prefixes stripped.
pub fn document(response: &str) -> DocumentResult {
    let map = split_sections(response, DOCUMENT_RULES);

    if map.is_empty() {
        return document_positional(response);
    }

    let summary = map
        .get("summary")
        .map(str::to_string)
        .or_else(|| first_paragraph(response))
        .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string());

    DocumentResult {
        summary,
        key_points: ensure_non_empty(
            map.get("key_points").map(clean_list_items).unwrap_or_default(),
            KEY_POINTS_PLACEHOLDER,
        ),
        topics: ensure_non_empty(
            map.get("topics").map(topic_items).unwrap_or_default(),
            TOPICS_PLACEHOLDER,
        ),
        suggestions: ensure_non_empty(
            map.get("suggestions").map(clean_list_items).unwrap_or_default(),
            SUGGESTIONS_PLACEHOLDER,
        ),
    }
}

/// Positional fallback: consecutive paragraphs taken as summary, key
/// points, topics, suggestions
fn document_positional(response: &str) -> DocumentResult {
    let paras = text::paragraphs(response);

    let summary = paras
        .first()
        .cloned()
        .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string());
    let key_points = paras.get(1).map(|p| clean_list_items(p)).unwrap_or_default();
    let topics = paras.get(2).map(|p| topic_items(p)).unwrap_or_default();
    let suggestions = paras.get(3).map(|p| clean_list_items(p)).unwrap_or_default();

    DocumentResult {
        summary,
        key_points: ensure_non_empty(key_points, KEY_POINTS_PLACEHOLDER),
        topics: ensure_non_empty(topics, TOPICS_PLACEHOLDER),
        suggestions: ensure_non_empty(suggestions, SUGGESTIONS_PLACEHOLDER),
    }
}

/// Segment an assignment response into solution, steps, concepts, and
/// resources, with the full fallback chain from the prompt contract.
pub fn assignment(response: &str, subject: &str) -> AssignmentResult {
    let map = split_sections(response, ASSIGNMENT_RULES);

    // Solution: headed section, else a truncated prefix of the response
    let solution = map
        .get("solution")
        .map(str::to_string)
        .unwrap_or_else(|| char_prefix(response, SOLUTION_PREFIX_CHARS).trim().to_string());

    // Steps: markers, then paragraph split, then derived from the solution
    let mut explanation = match map.get("steps") {
        Some(section) => {
            let marked = split_marked_items(section);
            if marked.is_empty() {
                text::paragraphs(section)
            } else {
                marked
            }
        }
        None => Vec::new(),
    };
    if explanation.is_empty() && !solution.is_empty() {
        explanation = steps_from_solution(&solution);
    }

    // Concepts and resources: markers, then line split, then placeholder
    let concepts = map
        .get("concepts")
        .map(marked_or_line_items)
        .unwrap_or_default();
    let resources = map
        .get("resources")
        .map(marked_or_line_items)
        .unwrap_or_default();

    AssignmentResult {
        solution,
        explanation: ensure_non_empty(explanation, EXPLANATION_PLACEHOLDER),
        concepts: ensure_non_empty(concepts, concepts_placeholder(subject)),
        resources: ensure_non_empty(resources, resources_placeholder(subject)),
        subject: subject.to_string(),
        difficulty: "Intermediate".to_string(),
    }
}

/// Marker-based split with a plain-line fallback
fn marked_or_line_items(section: &str) -> Vec<String> {
    let marked = split_marked_items(section);
    if marked.is_empty() {
        split_line_items(section)
    } else {
        marked
    }
}

/// List items with bullet/numbering prefixes stripped
fn clean_list_items(section: &str) -> Vec<String> {
    let raw = {
        let marked = split_marked_items(section);
        if marked.is_empty() {
            split_line_items(section)
        } else {
            marked
        }
    };

    raw.iter()
        .map(|item| strip_marker(item).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Topics split on commas when present, else treated as a list
fn topic_items(section: &str) -> Vec<String> {
    if section.contains(',') && !section.contains('\n') {
        split_comma_items(section)
    } else {
        clean_list_items(section)
    }
}
