//! Error types for the assist engine

use thiserror::Error;

/// Result type alias for assist engine operations
pub type Result<T> = std::result::Result<T, AssistError>;

/// Main error type for the assist engine
#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the generative-text endpoint
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Non-2xx response; carries the provider's error message when present
    #[error("{0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model returned no candidates")]
    EmptyResponse,
}

/// Input validation failures, caught before any network call
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Request requires an image")]
    MissingImage,

    #[error("Image size should be less than {}MB", .max_size / (1024 * 1024))]
    ImageTooLarge { size: usize, max_size: usize },

    #[error("Please upload an image file")]
    NotAnImage(String),

    #[error("File size should be less than {}MB", .max_size / (1024 * 1024))]
    FileTooLarge { size: usize, max_size: usize },

    #[error("Only .txt and .pdf files are supported")]
    UnsupportedFileType(String),

    #[error("File is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Errors from the external auth and billing backends
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Auth backend error: {0}")]
    Auth(String),

    #[error("Billing backend error: {0}")]
    Billing(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<config::ConfigError> for AssistError {
    fn from(err: config::ConfigError) -> Self {
        AssistError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_errors_report_configured_ceiling() {
        let err = ValidationError::ImageTooLarge {
            size: 6 * 1024 * 1024,
            max_size: 5 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "Image size should be less than 5MB");

        let err = ValidationError::FileTooLarge {
            size: 11 * 1024 * 1024,
            max_size: 8 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File size should be less than 8MB");
    }
}
