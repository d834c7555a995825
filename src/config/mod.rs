//! Configuration management for the assist engine

use serde::{Deserialize, Serialize};
use std::path::Path;
use secrecy::{Secret, ExposeSecret};

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub auth: AuthBackendConfig,
    pub billing: BillingConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

/// Configuration for the Gemini generateContent endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL
    #[serde(default = "default_gemini_url")]
    pub api_url: String,

    /// API key, passed as a query parameter (secured)
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    /// Model path for text-only requests
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model path for requests carrying inline image data
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Maximum tokens the model may generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

/// Configuration for the external auth backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthBackendConfig {
    /// Backend base URL (auth and row-level REST share it)
    pub base_url: String,

    /// Publishable anon key sent with every request (secured)
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub anon_key: Secret<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Configuration for the billing backend functions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Base URL for invoking named backend functions
    pub functions_url: String,

    /// Price id for the Basic plan
    #[serde(default = "default_basic_price")]
    pub basic_price_id: String,

    /// Price id for the Premium plan
    #[serde(default = "default_premium_price")]
    pub premium_price_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Upload and request size ceilings, enforced before any network call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum image upload size in MB
    #[serde(default = "default_max_image_mb")]
    pub max_image_mb: usize,

    /// Maximum document upload size in MB
    #[serde(default = "default_max_document_mb")]
    pub max_document_mb: usize,

    /// Maximum HTTP request body size in MB
    #[serde(default = "default_max_body_mb")]
    pub max_body_size_mb: usize,
}

impl LimitsConfig {
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_mb * 1024 * 1024
    }

    pub fn max_document_bytes(&self) -> usize {
        self.max_document_mb * 1024 * 1024
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Server host
    #[serde(default = "default_server_host")]
    pub host: String,
}

// Default value functions
fn default_gemini_url() -> String { "https://generativelanguage.googleapis.com/v1".to_string() }
fn default_text_model() -> String { "models/gemini-1.5-pro".to_string() }
fn default_vision_model() -> String { "models/gemini-1.5-pro-vision".to_string() }
fn default_max_output_tokens() -> u32 { 2048 }
fn default_timeout() -> u64 { 30 }
fn default_basic_price() -> String { "prod_RyTrD2k4nW1Qch".to_string() }
fn default_premium_price() -> String { "prod_RyTscqbW4wbgA8".to_string() }
fn default_max_image_mb() -> usize { 5 }
fn default_max_document_mb() -> usize { 10 }
fn default_max_body_mb() -> usize { 16 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }
fn default_server_port() -> u16 { 8080 }
fn default_server_host() -> String { "0.0.0.0".to_string() }

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config_with_env(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self {
            gemini: GeminiConfig {
                api_url: default_gemini_url(),
                api_key: Secret::new(std::env::var("GEMINI_API_KEY").unwrap_or_default()),
                text_model: default_text_model(),
                vision_model: default_vision_model(),
                max_output_tokens: default_max_output_tokens(),
            },
            auth: AuthBackendConfig {
                base_url: "http://localhost:54321".to_string(),
                anon_key: Secret::new(std::env::var("AUTH_ANON_KEY").unwrap_or_default()),
                timeout_secs: default_timeout(),
            },
            billing: BillingConfig {
                functions_url: "http://localhost:54321/functions/v1".to_string(),
                basic_price_id: default_basic_price(),
                premium_price_id: default_premium_price(),
                timeout_secs: default_timeout(),
            },
            limits: LimitsConfig {
                max_image_mb: default_max_image_mb(),
                max_document_mb: default_max_document_mb(),
                max_body_size_mb: default_max_body_mb(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            server: ServerConfig {
                port: default_server_port(),
                host: default_server_host(),
            },
        }
    }
}

/// Custom serializer for Secret<String>
fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Custom deserializer for Secret<String>
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Secret::new(s))
}
