//! End-to-end engine tests against a mocked generateContent endpoint

use edueasee_engine::config::Config;
use edueasee_engine::error::AssistError;
use edueasee_engine::gemini::GeminiClient;
use edueasee_engine::tools::{ToolEngine, ToolRequest, ToolResult};
use mockito::Matcher;
use secrecy::Secret;
use std::sync::Arc;

fn engine_for(server: &mockito::ServerGuard) -> ToolEngine {
    let mut config = Config::default_config();
    config.gemini.api_url = server.url();
    config.gemini.api_key = Secret::new("test-key".to_string());

    let generator = Arc::new(GeminiClient::new(config.gemini).unwrap());
    ToolEngine::new(generator, config.limits)
}

fn candidates_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_rewrite_round_trip() {
    let mut server = mockito::Server::new_async().await;

    // 15-word response for a 10-word input
    let response_text =
        "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen";
    let mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJsonString(
            r#"{ "generationConfig": { "temperature": 0.7, "topK": 40 } }"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body(response_text))
        .create_async()
        .await;

    let engine = engine_for(&server);
    let result = engine
        .run(ToolRequest::rewrite("a b c d e f g h i j"))
        .await
        .unwrap();

    mock.assert_async().await;

    match result {
        ToolResult::Rewrite(r) => {
            assert_eq!(r.word_count, 15);
            assert_eq!(r.rewritten_text, response_text);
            assert_eq!(r.improvements.len(), 4);
            assert_eq!(r.readability_score, "Professional");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_assignment_round_trip() {
    let mut server = mockito::Server::new_async().await;

    let response_text = "Solution:\nx = 4\n\nStep-by-Step:\n1. Apply formula\n2. Substitute values\n\nKey Concepts:\n1. Quadratic formula\n\nAdditional Resources:\n1. Algebra textbook ch.4";
    let mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body(response_text))
        .create_async()
        .await;

    let engine = engine_for(&server);
    let result = engine
        .run(ToolRequest::assignment("solve x^2 = 16", "Mathematics"))
        .await
        .unwrap();

    mock.assert_async().await;

    match result {
        ToolResult::Assignment(r) => {
            assert_eq!(r.solution, "x = 4");
            assert_eq!(r.explanation, vec!["1. Apply formula", "2. Substitute values"]);
            assert_eq!(r.subject, "Mathematics");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_image_request_uses_vision_model() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/models/gemini-1.5-pro-vision:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJsonString(
            r#"{ "generationConfig": { "temperature": 0.4, "topK": 32 } }"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body("x = 7"))
        .create_async()
        .await;

    let engine = engine_for(&server);
    let result = engine
        .run(ToolRequest::equation_from_image(
            "image/png",
            bytes::Bytes::from_static(b"fake png bytes"),
        ))
        .await
        .unwrap();

    mock.assert_async().await;

    match result {
        ToolResult::Equation(r) => assert_eq!(r.solution, "x = 7"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_provider_error_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "error": { "message": "API key not valid" } }"#)
        .create_async()
        .await;

    let engine = engine_for(&server);
    let err = engine
        .run(ToolRequest::grammar("fix this"))
        .await
        .unwrap_err();

    assert!(matches!(err, AssistError::Generator(_)));
    assert!(err.to_string().contains("API key not valid"));
}

#[tokio::test]
async fn test_opaque_failure_gets_generic_message() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("gateway exploded")
        .create_async()
        .await;

    let engine = engine_for(&server);
    let err = engine
        .run(ToolRequest::grammar("fix this"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to generate text"));
}

#[tokio::test]
async fn test_oversized_image_never_reaches_the_endpoint() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let engine = engine_for(&server);
    let six_mb = bytes::Bytes::from(vec![0u8; 6 * 1024 * 1024]);
    let err = engine
        .run(ToolRequest::equation_from_image("image/png", six_mb))
        .await
        .unwrap_err();

    assert!(matches!(err, AssistError::Validation(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_candidates_is_an_upstream_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "candidates": [] }"#)
        .create_async()
        .await;

    let engine = engine_for(&server);
    let err = engine
        .run(ToolRequest::equation("x + 1 = 2"))
        .await
        .unwrap_err();

    assert!(matches!(err, AssistError::Generator(_)));
}
