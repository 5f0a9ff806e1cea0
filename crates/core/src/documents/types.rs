//! Document data types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_shared::types::{ClientId, DocumentId, ProjectId, UserId};

/// A stored document with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: DocumentId,
    /// File name as uploaded.
    pub original_name: String,
    /// Generated name the bytes are stored under.
    pub file_name: String,
    /// Storage key.
    pub storage_key: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Lowercased extension.
    pub file_type: String,
    /// Document type key.
    pub document_type: String,
    /// Category key.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Related project.
    pub project_id: Option<ProjectId>,
    /// Related client.
    pub client_id: Option<ClientId>,
    /// Uploader.
    pub uploaded_by: Option<UserId>,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Last metadata change.
    pub updated_at: Option<DateTime<Utc>>,
    /// Name of the related client.
    pub client_name: Option<String>,
    /// Service of the related project.
    pub project_name: Option<String>,
}

/// Editable document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    /// Document type key.
    pub document_type: String,
    /// Category key.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Related project.
    pub project_id: Option<ProjectId>,
    /// Related client.
    pub client_id: Option<ClientId>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            document_type: "general".to_string(),
            category: "uncategorized".to_string(),
            description: String::new(),
            tags: String::new(),
            project_id: None,
            client_id: None,
        }
    }
}

/// A file to upload.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// File name as uploaded.
    pub original_name: String,
    /// File contents.
    pub data: Bytes,
    /// Metadata to record.
    pub metadata: DocumentMetadata,
    /// Uploader.
    pub uploaded_by: Option<UserId>,
}

/// Record inserted after the bytes are stored.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Document ID.
    pub id: DocumentId,
    /// File name as uploaded.
    pub original_name: String,
    /// Generated file name.
    pub file_name: String,
    /// Storage key.
    pub storage_key: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Lowercased extension.
    pub file_type: String,
    /// Metadata.
    pub metadata: DocumentMetadata,
    /// Uploader.
    pub uploaded_by: Option<UserId>,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

/// Document list filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFilter {
    /// Category key.
    pub category: Option<String>,
    /// Document type key.
    pub document_type: Option<String>,
    /// Related client.
    pub client_id: Option<ClientId>,
    /// Related project.
    pub project_id: Option<ProjectId>,
    /// Case-insensitive substring of name, description or tags.
    pub search: Option<String>,
    /// Maximum number of rows.
    pub limit: Option<u64>,
}

impl DocumentFilter {
    /// Whether `doc` passes every field except `limit`.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        let search_hit = self.search.as_deref().filter(|s| !s.is_empty()).is_none_or(|s| {
            let needle = s.to_lowercase();
            [&doc.original_name, &doc.description, &doc.tags]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });

        self.category.as_ref().is_none_or(|c| *c == doc.category)
            && self
                .document_type
                .as_ref()
                .is_none_or(|t| *t == doc.document_type)
            && self.client_id.is_none_or(|c| doc.client_id == Some(c))
            && self.project_id.is_none_or(|p| doc.project_id == Some(p))
            && search_hit
    }
}

/// Raw per-category usage reported by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUsage {
    /// Category key.
    pub category: String,
    /// Number of documents.
    pub document_count: u64,
    /// Sum of file sizes.
    pub total_size: u64,
}

/// Storage use across all documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StorageTotals {
    /// Number of documents.
    pub total_documents: u64,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Mean file size in bytes.
    pub avg_size: Decimal,
}

/// Storage use of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    /// Category key.
    pub category: String,
    /// Number of documents.
    pub document_count: u64,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Mean file size in bytes.
    pub avg_size: Decimal,
}

/// Storage statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// All documents.
    pub total: StorageTotals,
    /// Per category, largest first.
    pub by_category: Vec<CategoryStats>,
}

impl StorageStats {
    /// Derives totals and averages from per-category usage.
    #[must_use]
    pub fn from_usage(usage: Vec<CategoryUsage>) -> Self {
        fn average(total: u64, count: u64) -> Decimal {
            if count == 0 {
                Decimal::ZERO
            } else {
                (Decimal::from(total) / Decimal::from(count)).round_dp(2)
            }
        }

        let total_documents = usage.iter().map(|u| u.document_count).sum();
        let total_size = usage.iter().map(|u| u.total_size).sum();

        let mut by_category: Vec<CategoryStats> = usage
            .into_iter()
            .map(|u| CategoryStats {
                avg_size: average(u.total_size, u.document_count),
                category: u.category,
                document_count: u.document_count,
                total_size: u.total_size,
            })
            .collect();
        by_category.sort_by(|a, b| b.total_size.cmp(&a.total_size));

        Self {
            total: StorageTotals {
                total_documents,
                total_size,
                avg_size: average(total_size, total_documents),
            },
            by_category,
        }
    }
}
