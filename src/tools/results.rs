//! Tool-specific structured results
//!
//! One tagged variant per tool kind, each with a fixed, fully-populated
//! field set. List fields are never empty and string fields never hold
//! an absent value; the segmenter's fallback chain guarantees it.

use serde::Serialize;

/// Fixed improvements list reported for every rewrite
pub const REWRITE_IMPROVEMENTS: [&str; 4] = [
    "Enhanced academic tone",
    "Improved clarity and coherence",
    "Professional language usage",
    "Better sentence structure",
];

/// Fixed changes list reported for every paraphrase
pub const PARAPHRASE_CHANGES: [&str; 4] = [
    "Alternative word choices",
    "Restructured sentences",
    "Preserved meaning",
    "Natural flow",
];

/// Result of a rewrite request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteResult {
    pub rewritten_text: String,
    pub improvements: Vec<String>,
    pub readability_score: String,
    pub word_count: usize,
}

/// Result of a paraphrase request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParaphraseResult {
    pub paraphrased_text: String,
    pub changes: Vec<String>,
    pub original_length: usize,
    pub new_length: usize,
}

/// Result of a grammar-correction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarResult {
    pub corrected_text: String,
    pub corrections: Vec<String>,
    pub error_count: usize,
    pub suggestion_count: usize,
    pub readability_improvement: String,
}

/// Result of an equation request (text or image path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationResult {
    pub solution: String,
}

/// Result of a document-analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub topics: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Result of an assignment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    pub solution: String,
    pub explanation: Vec<String>,
    pub concepts: Vec<String>,
    pub resources: Vec<String>,
    pub subject: String,
    pub difficulty: String,
}

/// Tagged union of all tool results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolResult {
    Rewrite(RewriteResult),
    Paraphrase(ParaphraseResult),
    Grammar(GrammarResult),
    Equation(EquationResult),
    Document(DocumentResult),
    Assignment(AssignmentResult),
}
