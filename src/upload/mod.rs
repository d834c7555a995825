//! Upload validation and document text extraction
//!
//! All checks run before any network call; a failure aborts the
//! invocation with no side effects.

use crate::config::LimitsConfig;
use crate::error::ValidationError;
use tracing::warn;

/// Validate an image upload: must be an `image/*` mime type and fit
/// under the configured ceiling.
pub fn validate_image(
    mime_type: &str,
    data: &[u8],
    limits: &LimitsConfig,
) -> Result<(), ValidationError> {
    if !mime_type.starts_with("image/") {
        warn!(mime_type, "Rejected non-image upload");
        return Err(ValidationError::NotAnImage(mime_type.to_string()));
    }

    let max = limits.max_image_bytes();
    if data.len() > max {
        warn!(size = data.len(), max, "Rejected oversized image");
        return Err(ValidationError::ImageTooLarge {
            size: data.len(),
            max_size: max,
        });
    }

    Ok(())
}

/// Extract text from an uploaded document.
///
/// `.txt` files are decoded as UTF-8. PDF bytes are NOT parsed: a
/// placeholder naming the file is substituted, preserving the behavior
/// of the shipped product until real extraction becomes a requirement.
pub fn extract_document_text(
    file_name: &str,
    mime_type: &str,
    data: &[u8],
    limits: &LimitsConfig,
) -> Result<String, ValidationError> {
    let max = limits.max_document_bytes();
    if data.len() > max {
        warn!(size = data.len(), max, "Rejected oversized document");
        return Err(ValidationError::FileTooLarge {
            size: data.len(),
            max_size: max,
        });
    }

    match mime_type {
        "text/plain" => String::from_utf8(data.to_vec())
            .map_err(|e| ValidationError::InvalidEncoding(e.to_string())),
        "application/pdf" => Ok(format!("[PDF content extracted from: {}]", file_name)),
        other => {
            warn!(mime_type = other, "Rejected unsupported document type");
            Err(ValidationError::UnsupportedFileType(other.to_string()))
        }
    }
}
