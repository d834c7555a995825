//! Tool engine: validate, compose, call the generator, segment

use super::prompts;
use super::request::{ToolKind, ToolRequest};
use super::results::ToolResult;
use super::SUBJECTS;
use crate::config::LimitsConfig;
use crate::error::Result;
use crate::gemini::TextGenerator;
use crate::segment;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Runs tool invocations against a generative-text provider.
///
/// Stateless across calls: each invocation validates its request, sends
/// one prompt, and segments one response. Nothing is cached or retried.
pub struct ToolEngine {
    generator: Arc<dyn TextGenerator>,
    limits: LimitsConfig,
}

impl ToolEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, limits: LimitsConfig) -> Self {
        Self { generator, limits }
    }

    /// Run one tool invocation end to end
    pub async fn run(&self, request: ToolRequest) -> Result<ToolResult> {
        let request_id = Uuid::new_v4();
        info!(%request_id, tool = request.kind.as_str(), "Running tool request");

        request.validate(&self.limits)?;

        let prompt = prompts::compose(&request);
        debug!(%request_id, prompt_chars = prompt.len(), "Prompt composed");

        let response = match &request.image {
            Some(image) => {
                self.generator
                    .generate_with_image(&prompt, &image.mime_type, &image.data)
                    .await?
            }
            None => self.generator.generate(&prompt).await?,
        };

        let result = match request.kind {
            ToolKind::Rewrite => ToolResult::Rewrite(segment::rewrite(&response)),
            ToolKind::Paraphrase => {
                ToolResult::Paraphrase(segment::paraphrase(&response, &request.raw_text))
            }
            ToolKind::Grammar => ToolResult::Grammar(segment::grammar(&response)),
            ToolKind::Equation => ToolResult::Equation(segment::equation(&response)),
            ToolKind::Document => ToolResult::Document(segment::document(&response)),
            ToolKind::Assignment => {
                let subject = request.subject.as_deref().unwrap_or(SUBJECTS[0]);
                ToolResult::Assignment(segment::assignment(&response, subject))
            }
        };

        info!(%request_id, "Tool request completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{AssistError, Result};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator stub returning a canned response and counting calls
    struct StubGenerator {
        response: String,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        async fn generate_with_image(
            &self,
            _prompt: &str,
            _mime_type: &str,
            _image: &[u8],
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn engine_with(generator: Arc<StubGenerator>) -> ToolEngine {
        ToolEngine::new(generator, Config::default_config().limits)
    }

    #[tokio::test]
    async fn test_rewrite_counts_response_words() {
        // 10-word input, 15-word response
        let generator = StubGenerator::new(
            "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen",
        );
        let engine = engine_with(generator.clone());

        let input = "a b c d e f g h i j";
        let result = engine.run(ToolRequest::rewrite(input)).await.unwrap();

        match result {
            ToolResult::Rewrite(r) => {
                assert_eq!(r.word_count, 15);
                assert_eq!(r.improvements.len(), 4);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_paraphrase_lengths_from_both_sides() {
        let generator = StubGenerator::new("short answer here");
        let engine = engine_with(generator);

        let result = engine
            .run(ToolRequest::paraphrase("the original four words"))
            .await
            .unwrap();

        match result {
            ToolResult::Paraphrase(r) => {
                assert_eq!(r.original_length, 4);
                assert_eq!(r.new_length, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_assignment_carries_subject() {
        let generator = StubGenerator::new("The answer is 42 because of simple arithmetic.");
        let engine = engine_with(generator);

        let result = engine
            .run(ToolRequest::assignment("what is 6 * 7", "Mathematics"))
            .await
            .unwrap();

        match result {
            ToolResult::Assignment(r) => {
                assert_eq!(r.subject, "Mathematics");
                assert_eq!(
                    r.concepts,
                    vec!["Key Mathematics principles applied to solve this problem."]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_oversized_image_aborts_before_network() {
        let generator = StubGenerator::new("never used");
        let engine = engine_with(generator.clone());

        let six_mb = Bytes::from(vec![0u8; 6 * 1024 * 1024]);
        let err = engine
            .run(ToolRequest::equation_from_image("image/png", six_mb))
            .await
            .unwrap_err();

        assert!(matches!(err, AssistError::Validation(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_text_aborts_before_network() {
        let generator = StubGenerator::new("never used");
        let engine = engine_with(generator.clone());

        let err = engine.run(ToolRequest::grammar("")).await.unwrap_err();

        assert!(matches!(err, AssistError::Validation(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_image_path_uses_vision_call() {
        let generator = StubGenerator::new("x = 2");
        let engine = engine_with(generator.clone());

        let result = engine
            .run(ToolRequest::equation_from_image(
                "image/jpeg",
                Bytes::from_static(b"jpeg bytes"),
            ))
            .await
            .unwrap();

        match result {
            ToolResult::Equation(r) => assert_eq!(r.solution, "x = 2"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
