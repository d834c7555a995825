//! Configuration validation

use super::Config;
use crate::error::{AssistError, Result};
use secrecy::ExposeSecret;

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.gemini.api_key.expose_secret().is_empty() {
        return Err(AssistError::Config(
            "Gemini API key is required".to_string()
        ));
    }

    if config.gemini.api_url.is_empty() {
        return Err(AssistError::Config(
            "Gemini API URL is required".to_string()
        ));
    }

    if config.gemini.max_output_tokens == 0 {
        return Err(AssistError::Config(
            "Max output tokens must be greater than 0".to_string()
        ));
    }

    if config.auth.base_url.is_empty() {
        return Err(AssistError::Config(
            "Auth backend base URL is required".to_string()
        ));
    }

    if config.billing.functions_url.is_empty() {
        return Err(AssistError::Config(
            "Billing functions URL is required".to_string()
        ));
    }

    if config.limits.max_image_mb == 0 || config.limits.max_document_mb == 0 {
        return Err(AssistError::Config(
            "Upload size limits must be greater than 0".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config() {
        let mut config = Config::default_config();
        config.gemini.api_key = secrecy::Secret::new("test_key".to_string());

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_api_key() {
        let mut config = Config::default_config();
        config.gemini.api_key = secrecy::Secret::new("".to_string());

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_limits() {
        let mut config = Config::default_config();
        config.gemini.api_key = secrecy::Secret::new("test_key".to_string());
        config.limits.max_image_mb = 0;

        assert!(validate_config(&config).is_err());
    }
}
