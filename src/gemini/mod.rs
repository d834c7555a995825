//! Client for the Gemini generateContent endpoint

pub mod client;
pub mod models;

pub use client::GeminiClient;
pub use models::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};

use async_trait::async_trait;
use crate::error::Result;

/// Trait for generative-text providers
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text from a prompt plus an inline image
    async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String>;
}
