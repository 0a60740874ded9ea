//! Error types for the NPK advisor
//!
//! The engine fails fast and hands these to the caller; nothing is retried
//! or swallowed inside the crate.

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Main error type for advisor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// Crop name not present in the knowledge base
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    /// Classifier bundle missing, malformed, or inconsistent
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Argument outside the accepted domain (e.g. non-positive NPK for prediction)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AdvisorError {
    pub(crate) fn model(msg: impl Into<String>) -> Self {
        AdvisorError::ModelUnavailable(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AdvisorError::InvalidInput(msg.into())
    }
}
