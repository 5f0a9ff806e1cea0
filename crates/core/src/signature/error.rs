//! Signature template error types.

use studio_shared::types::SignatureTemplateId;
use thiserror::Error;

/// Signature template operation errors.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Template not found.
    #[error("signature template not found: {0}")]
    NotFound(SignatureTemplateId),

    /// Template input rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl SignatureError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
