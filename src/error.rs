//! Error types for the harvester.
//!
//! The core fails fast only on structural problems that make a whole
//! document unusable (`ContentRoot`, `EmptyDocument`); everything else
//! degrades through the documented fallback paths and is logged, not
//! returned.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Invalid portal act reference.
    #[error("Invalid act reference: '{0}'. Expected a portal reference like 254к/96-вр or 2341-14")]
    InvalidActRef(String),

    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2025-01-01)")]
    InvalidDate(String),

    /// The expected content container is missing from a print page.
    ///
    /// A multi-document run should record this act and continue.
    #[error("No content container found in print page for {act_ref}")]
    ContentRoot { act_ref: String },

    /// Segmentation produced nothing, and the whole-document fallback
    /// was empty too.
    #[error("Document {act_ref} yielded no provisions and no fallback body")]
    EmptyDocument { act_ref: String },

    /// Unknown act reference in the curated source registry.
    #[error("Act reference '{0}' is not in the source registry")]
    UnknownSource(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Portal returned a non-success status after retries.
    #[error("Portal returned HTTP {status} for {url}")]
    PortalStatus { status: u16, url: String },

    /// All retry attempts exhausted.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_act_ref_display() {
        let err = HarvestError::InvalidActRef("???".to_string());
        assert!(err.to_string().contains("???"));
        assert!(err.to_string().contains("254к/96-вр"));
    }

    #[test]
    fn test_content_root_display() {
        let err = HarvestError::ContentRoot {
            act_ref: "2341-14".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No content container found in print page for 2341-14"
        );
    }

    #[test]
    fn test_empty_document_display() {
        let err = HarvestError::EmptyDocument {
            act_ref: "2341-14".to_string(),
        };
        assert!(err.to_string().contains("no provisions"));
    }
}
