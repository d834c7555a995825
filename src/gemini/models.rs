//! Wire types for Gemini generateContent requests and responses

use serde::{Deserialize, Serialize};

/// Request body for generateContent
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Content container used in both requests and responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload used for image requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Sampling defaults for text-only prompts
    pub fn text(max_output_tokens: u32) -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens,
        }
    }

    /// Sampling defaults for prompts carrying an image
    pub fn vision(max_output_tokens: u32) -> Self {
        Self {
            temperature: 0.4,
            top_k: 32,
            top_p: 0.95,
            max_output_tokens,
        }
    }
}

/// Top-level generateContent response envelope
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// Error envelope returned on non-2xx status
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

impl GenerateContentRequest {
    /// Build a text-only request
    pub fn text(prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::Text { text: prompt.into() }],
            }],
            generation_config: Some(config),
        }
    }

    /// Build a request carrying a prompt plus base64-encoded image data
    pub fn with_image(
        prompt: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt.into() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.into(),
                            data: data.into(),
                        },
                    },
                ],
            }],
            generation_config: Some(config),
        }
    }
}

impl GenerateContentResponse {
    /// Extract the generated text at `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_shape() {
        let req = GenerateContentRequest::text("hello", GenerationConfig::text(2048));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["temperature"], 0.7);
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_image_request_shape() {
        let req = GenerateContentRequest::with_image(
            "solve this",
            "image/png",
            "aGVsbG8=",
            GenerationConfig::vision(2048),
        );
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(json["generationConfig"]["temperature"], 0.4);
    }

    #[test]
    fn test_response_first_text() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "x = 4" } ] } }
            ]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_text(), Some("x = 4"));
    }

    #[test]
    fn test_response_no_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.first_text(), None);
    }
}
