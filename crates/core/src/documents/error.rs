//! Document error types.

use studio_shared::types::DocumentId;
use thiserror::Error;

use crate::storage::StorageError;

/// Document operation errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Upload carried no bytes.
    #[error("uploaded file is empty")]
    EmptyUpload,

    /// File too large.
    #[error("file too large: {size} bytes exceeds maximum {max} bytes")]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Extension missing from the allow-list.
    #[error("file type not allowed: '{extension}'")]
    ExtensionNotAllowed {
        /// Lowercased extension, empty if the name had none.
        extension: String,
    },

    /// Document not found.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl DocumentError {
    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create an extension not allowed error.
    #[must_use]
    pub fn extension_not_allowed(extension: impl Into<String>) -> Self {
        Self::ExtensionNotAllowed {
            extension: extension.into(),
        }
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
