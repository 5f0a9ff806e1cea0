//! Upload validation and stored names.

use std::path::Path;

use chrono::{DateTime, Utc};
use studio_shared::DocumentsConfig;
use studio_shared::types::DocumentId;

use super::error::DocumentError;

/// Size limit and extension allow-list for uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl UploadRules {
    /// Create rules. Extensions are compared lowercase.
    #[must_use]
    pub fn new(max_file_size: u64, allowed_extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Maximum accepted size in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Checks an upload and returns its lowercased extension.
    ///
    /// Empty files are rejected first, then oversized ones, then
    /// extensions outside the allow-list.
    pub fn validate(&self, file_name: &str, size: u64) -> Result<String, DocumentError> {
        if size == 0 {
            return Err(DocumentError::EmptyUpload);
        }
        if size > self.max_file_size {
            return Err(DocumentError::file_too_large(size, self.max_file_size));
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if extension.is_empty() || !self.allowed_extensions.contains(&extension) {
            return Err(DocumentError::extension_not_allowed(extension));
        }
        Ok(extension)
    }
}

impl From<&DocumentsConfig> for UploadRules {
    fn from(config: &DocumentsConfig) -> Self {
        Self::new(config.max_file_size, config.allowed_extensions.iter().cloned())
    }
}

impl Default for UploadRules {
    fn default() -> Self {
        Self::from(&DocumentsConfig::default())
    }
}

/// `{id}_{unix_seconds}.{extension}`.
#[must_use]
pub fn stored_file_name(id: DocumentId, uploaded_at: DateTime<Utc>, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        id.into_inner().simple(),
        uploaded_at.timestamp(),
        extension
    )
}
