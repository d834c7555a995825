//! Fallback policy for sections the response never produced
//!
//! Parsing degradation is not an error: any missing heading or empty list
//! resolves to a deterministic placeholder so every result field ends
//! non-empty.

use super::text::{char_prefix, paragraphs};

/// Prefix taken from the whole response when no solution heading is found
pub const SOLUTION_PREFIX_CHARS: usize = 500;

/// Prefix taken from the solution when a single step must be synthesized
pub const STEP_PREFIX_CHARS: usize = 200;

/// Last-resort explanation item
pub const EXPLANATION_PLACEHOLDER: &str =
    "The solution process is straightforward as shown above.";

/// Placeholder concepts item naming the request's subject
pub fn concepts_placeholder(subject: &str) -> String {
    format!("Key {} principles applied to solve this problem.", subject)
}

/// Placeholder resources item naming the request's subject
pub fn resources_placeholder(subject: &str) -> String {
    format!("Standard {} textbooks and course materials.", subject)
}

/// Document-analysis placeholders
pub const SUMMARY_PLACEHOLDER: &str = "No summary available";
pub const KEY_POINTS_PLACEHOLDER: &str = "No key points identified in the document.";
pub const TOPICS_PLACEHOLDER: &str = "General document analysis.";
pub const SUGGESTIONS_PLACEHOLDER: &str = "No specific suggestions for improvement.";

/// Derive explanation steps from the solution text itself: number its
/// paragraphs, or synthesize a single truncated item.
pub fn steps_from_solution(solution: &str) -> Vec<String> {
    let paras = paragraphs(solution);
    if paras.len() > 1 {
        paras
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {}", i + 1, p))
            .collect()
    } else {
        vec![format!("1. {}...", char_prefix(solution, STEP_PREFIX_CHARS))]
    }
}

/// Guarantee a list field is non-empty
pub fn ensure_non_empty(items: Vec<String>, placeholder: impl Into<String>) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.into()]
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_from_multi_paragraph_solution() {
        let solution = "First do this.\n\nThen do that.";
        assert_eq!(
            steps_from_solution(solution),
            vec!["1. First do this.", "2. Then do that."]
        );
    }

    #[test]
    fn test_steps_from_short_solution() {
        let steps = steps_from_solution("x = 4");
        assert_eq!(steps, vec!["1. x = 4..."]);
    }

    #[test]
    fn test_steps_truncate_long_solution() {
        let solution = "a".repeat(300);
        let steps = steps_from_solution(&solution);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0], format!("1. {}...", "a".repeat(STEP_PREFIX_CHARS)));
    }

    #[test]
    fn test_subject_placeholders() {
        assert_eq!(
            concepts_placeholder("Mathematics"),
            "Key Mathematics principles applied to solve this problem."
        );
        assert_eq!(
            resources_placeholder("Mathematics"),
            "Standard Mathematics textbooks and course materials."
        );
    }

    #[test]
    fn test_ensure_non_empty() {
        assert_eq!(ensure_non_empty(vec![], "fallback"), vec!["fallback"]);
        assert_eq!(
            ensure_non_empty(vec!["kept".to_string()], "fallback"),
            vec!["kept"]
        );
    }
}
