//! Prompt composer: one fixed instruction string per tool
//!
//! Pure string concatenation, never fails. The user's raw text is
//! embedded verbatim after the tool-specific preamble.

use super::request::{ToolKind, ToolRequest};
use super::SUBJECTS;

/// Fixed instruction for the equation-from-image path; there is no user
/// text to embed.
pub const EQUATION_IMAGE_PROMPT: &str = "Identify and solve the mathematical equation in this image. Please show step-by-step work and explain each step clearly. If there are multiple equations, solve each one separately.";

/// Render the instruction string for a request
pub fn compose(request: &ToolRequest) -> String {
    match request.kind {
        ToolKind::Rewrite => format!(
            "Rewrite the following text in a more academic and professional tone, maintaining clarity and coherence: \n\n{}",
            request.raw_text
        ),
        ToolKind::Paraphrase => format!(
            "Paraphrase the following text with different wording while maintaining the original meaning: \n\n{}",
            request.raw_text
        ),
        ToolKind::Grammar => format!(
            "Correct any grammatical errors, spelling mistakes, or awkward phrasing in the following text. Provide a list of corrections made: \n\n{}",
            request.raw_text
        ),
        ToolKind::Equation => {
            if request.image.is_some() {
                EQUATION_IMAGE_PROMPT.to_string()
            } else {
                format!(
                    "Solve the following equation step by step, showing all work and explaining each step: \n\n{}",
                    request.raw_text
                )
            }
        }
        ToolKind::Document => format!(
            "Analyze the following document and provide:\n1. A comprehensive summary\n2. Key points\n3. Main topics\n4. Suggestions for improvement\n\nDocument:\n{}",
            request.raw_text
        ),
        ToolKind::Assignment => {
            let subject = request.subject.as_deref().unwrap_or(SUBJECTS[0]);
            format!(
                "This is a {} assignment. Please provide:\n1. A detailed solution\n2. Step-by-step explanation (list at least 5-7 detailed steps with clear explanations for each)\n3. Key concepts used\n4. Additional resources\n\nAssignment:\n{}",
                subject, request.raw_text
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRequest;
    use bytes::Bytes;

    #[test]
    fn test_rewrite_prompt_embeds_text_verbatim() {
        let prompt = compose(&ToolRequest::rewrite("my <raw> text"));
        assert!(prompt.starts_with("Rewrite the following text"));
        assert!(prompt.ends_with("\n\nmy <raw> text"));
    }

    #[test]
    fn test_assignment_prompt_embeds_subject() {
        let prompt = compose(&ToolRequest::assignment("prove it", "Physics"));
        assert!(prompt.starts_with("This is a Physics assignment."));
        assert!(prompt.contains("1. A detailed solution"));
        assert!(prompt.contains("4. Additional resources"));
        assert!(prompt.ends_with("Assignment:\nprove it"));
    }

    #[test]
    fn test_assignment_prompt_defaults_subject() {
        let mut request = ToolRequest::assignment("question", "Mathematics");
        request.subject = None;
        let prompt = compose(&request);
        assert!(prompt.starts_with("This is a Mathematics assignment."));
    }

    #[test]
    fn test_document_prompt_enumerates_sections() {
        let prompt = compose(&ToolRequest::document("the doc"));
        assert!(prompt.contains("1. A comprehensive summary"));
        assert!(prompt.contains("2. Key points"));
        assert!(prompt.contains("3. Main topics"));
        assert!(prompt.ends_with("Document:\nthe doc"));
    }

    #[test]
    fn test_equation_image_prompt_is_fixed() {
        let request = ToolRequest::equation_from_image("image/png", Bytes::from_static(b"x"));
        assert_eq!(compose(&request), EQUATION_IMAGE_PROMPT);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let request = ToolRequest::grammar("some text");
        assert_eq!(compose(&request), compose(&request));
    }
}
