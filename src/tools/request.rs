//! Request-scoped tool invocation model

use crate::config::LimitsConfig;
use crate::error::ValidationError;
use crate::upload::validate_image;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The supported assist tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Rewrite,
    Paraphrase,
    Grammar,
    Equation,
    Document,
    Assignment,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Rewrite => "rewrite",
            ToolKind::Paraphrase => "paraphrase",
            ToolKind::Grammar => "grammar",
            ToolKind::Equation => "equation",
            ToolKind::Document => "document",
            ToolKind::Assignment => "assignment",
        }
    }
}

/// Image payload attached to an equation-from-image request
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Bytes,
}

/// One tool invocation. Transient: created on submit, discarded after the
/// result is produced.
///
/// Invariant: `raw_text` is non-empty or `image` is present; the
/// equation-from-image path requires only the image.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub kind: ToolKind,
    pub raw_text: String,
    pub subject: Option<String>,
    pub image: Option<ImageAttachment>,
}

impl ToolRequest {
    pub fn rewrite(text: impl Into<String>) -> Self {
        Self::text_request(ToolKind::Rewrite, text)
    }

    pub fn paraphrase(text: impl Into<String>) -> Self {
        Self::text_request(ToolKind::Paraphrase, text)
    }

    pub fn grammar(text: impl Into<String>) -> Self {
        Self::text_request(ToolKind::Grammar, text)
    }

    pub fn equation(text: impl Into<String>) -> Self {
        Self::text_request(ToolKind::Equation, text)
    }

    pub fn equation_from_image(mime_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            kind: ToolKind::Equation,
            raw_text: String::new(),
            subject: None,
            image: Some(ImageAttachment {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }

    pub fn document(text: impl Into<String>) -> Self {
        Self::text_request(ToolKind::Document, text)
    }

    pub fn assignment(text: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            kind: ToolKind::Assignment,
            raw_text: text.into(),
            subject: Some(subject.into()),
            image: None,
        }
    }

    fn text_request(kind: ToolKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            raw_text: text.into(),
            subject: None,
            image: None,
        }
    }

    /// Validate the request against the configured upload ceilings.
    /// Runs before any network call; a failure aborts the invocation
    /// with no side effects.
    pub fn validate(&self, limits: &LimitsConfig) -> Result<(), ValidationError> {
        match &self.image {
            Some(image) => validate_image(&image.mime_type, &image.data, limits),
            None => {
                if self.raw_text.trim().is_empty() {
                    return Err(ValidationError::EmptyInput);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn limits() -> LimitsConfig {
        Config::default_config().limits
    }

    #[test]
    fn test_text_request_requires_text() {
        let request = ToolRequest::rewrite("");
        assert!(matches!(
            request.validate(&limits()),
            Err(ValidationError::EmptyInput)
        ));

        let request = ToolRequest::rewrite("   \n ");
        assert!(request.validate(&limits()).is_err());

        let request = ToolRequest::rewrite("some text");
        assert!(request.validate(&limits()).is_ok());
    }

    #[test]
    fn test_image_request_needs_no_text() {
        let request = ToolRequest::equation_from_image("image/png", Bytes::from_static(b"png"));
        assert!(request.validate(&limits()).is_ok());
    }

    #[test]
    fn test_oversized_image_rejected() {
        let six_mb = Bytes::from(vec![0u8; 6 * 1024 * 1024]);
        let request = ToolRequest::equation_from_image("image/png", six_mb);
        assert!(matches!(
            request.validate(&limits()),
            Err(ValidationError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_image_checks_match_upload_module() {
        // Same ceiling on both paths: a payload exactly at the limit
        // passes, one byte over fails, here and in upload::validate_image.
        let at_limit = Bytes::from(vec![0u8; limits().max_image_bytes()]);
        let over = Bytes::from(vec![0u8; limits().max_image_bytes() + 1]);

        assert!(validate_image("image/png", &at_limit, &limits()).is_ok());
        assert!(ToolRequest::equation_from_image("image/png", at_limit)
            .validate(&limits())
            .is_ok());

        assert!(validate_image("image/png", &over, &limits()).is_err());
        assert!(ToolRequest::equation_from_image("image/png", over)
            .validate(&limits())
            .is_err());
    }

    #[test]
    fn test_non_image_mime_rejected() {
        let request = ToolRequest::equation_from_image("application/pdf", Bytes::from_static(b"x"));
        assert!(matches!(
            request.validate(&limits()),
            Err(ValidationError::NotAnImage(_))
        ));
    }
}
