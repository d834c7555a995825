//! HTTP client for the Gemini generateContent endpoint

use super::models::*;
use super::TextGenerator;
use crate::config::GeminiConfig;
use crate::error::{GeneratorError, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::{debug, error};

/// Client for the generative-text API.
///
/// Requests are single-shot: no retry, no backoff, no client-side timeout.
/// A stuck request stays in flight until the transport itself errors.
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    /// Create a new client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(GeneratorError::Network)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create client with custom HTTP client
    pub fn with_http_client(config: GeminiConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.api_url,
            model,
            self.config.api_key.expose_secret()
        )
    }

    async fn send(&self, model: &str, request: &GenerateContentRequest) -> Result<String> {
        debug!(model, "Sending generateContent request");

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(GeneratorError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Failed to generate text".to_string());

            error!(%status, %message, "generateContent request failed");
            return Err(GeneratorError::Api(message).into());
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(GeneratorError::Network)?;

        match body.first_text() {
            Some(text) => {
                debug!(chars = text.len(), "Received generated text");
                Ok(text.to_string())
            }
            None => Err(GeneratorError::EmptyResponse.into()),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::text(
            prompt,
            GenerationConfig::text(self.config.max_output_tokens),
        );
        self.send(&self.config.text_model, &request).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String> {
        let data = base64::engine::general_purpose::STANDARD.encode(image);
        let request = GenerateContentRequest::with_image(
            prompt,
            mime_type,
            data,
            GenerationConfig::vision(self.config.max_output_tokens),
        );
        self.send(&self.config.vision_model, &request).await
    }
}
