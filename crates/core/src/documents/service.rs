//! Document service implementation.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use studio_shared::types::DocumentId;
use tracing::warn;

use super::error::DocumentError;
use super::types::{
    CategoryUsage, Document, DocumentFilter, DocumentMetadata, NewDocument, StorageStats,
    UploadInput,
};
use super::validation::{UploadRules, stored_file_name};
use crate::storage::StorageService;

/// Repository trait for document persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait DocumentRepository: Send + Sync {
    /// Insert a new document record.
    fn insert(
        &self,
        input: NewDocument,
    ) -> impl std::future::Future<Output = Result<Document, DocumentError>> + Send;

    /// Find document by ID.
    fn find_by_id(
        &self,
        id: DocumentId,
    ) -> impl std::future::Future<Output = Result<Option<Document>, DocumentError>> + Send;

    /// List documents matching `filter`, newest first.
    fn list(
        &self,
        filter: DocumentFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send;

    /// Replace the metadata of a document.
    fn update_metadata(
        &self,
        id: DocumentId,
        metadata: DocumentMetadata,
    ) -> impl std::future::Future<Output = Result<Option<Document>, DocumentError>> + Send;

    /// Delete document by ID.
    fn delete(
        &self,
        id: DocumentId,
    ) -> impl std::future::Future<Output = Result<bool, DocumentError>> + Send;

    /// Document count and total size per category.
    fn usage_by_category(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CategoryUsage>, DocumentError>> + Send;
}

/// Document service for managing uploaded files.
pub struct DocumentService<R: DocumentRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
    rules: UploadRules,
}

impl<R: DocumentRepository> DocumentService<R> {
    /// Create a new document service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>, rules: UploadRules) -> Self {
        Self {
            storage,
            repo,
            rules,
        }
    }

    /// Validate, store and record an upload.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is empty, too large or of a disallowed type
    /// - Storage write fails
    /// - Database insert fails (the stored file is removed again)
    pub async fn upload(&self, input: UploadInput) -> Result<Document, DocumentError> {
        let size = input.data.len() as u64;
        let file_type = self.rules.validate(&input.original_name, size)?;

        let id = DocumentId::new();
        let created_at = Utc::now();
        let file_name = stored_file_name(id, created_at, &file_type);

        self.storage.write(&file_name, input.data).await?;

        let record = NewDocument {
            id,
            original_name: input.original_name,
            storage_key: file_name.clone(),
            file_name,
            file_size: size,
            file_type,
            metadata: input.metadata,
            uploaded_by: input.uploaded_by,
            created_at,
        };
        let storage_key = record.storage_key.clone();

        match self.repo.insert(record).await {
            Ok(document) => Ok(document),
            Err(err) => {
                // Roll back the stored file; the insert error wins.
                if let Err(cleanup) = self.storage.delete(&storage_key).await {
                    warn!(%storage_key, error = %cleanup, "orphaned upload after failed insert");
                }
                Err(err)
            }
        }
    }

    /// List documents, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails.
    pub async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>, DocumentError> {
        self.repo.list(filter).await
    }

    /// List documents whose name, description or tags contain `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails.
    pub async fn search(
        &self,
        query: &str,
        filter: DocumentFilter,
    ) -> Result<Vec<Document>, DocumentError> {
        self.list(DocumentFilter {
            search: Some(query.to_string()),
            ..filter
        })
        .await
    }

    /// Get document by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if document not found or database operation fails.
    pub async fn get(&self, id: DocumentId) -> Result<Document, DocumentError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Replace a document's metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if document not found or database operation fails.
    pub async fn update_metadata(
        &self,
        id: DocumentId,
        metadata: DocumentMetadata,
    ) -> Result<Document, DocumentError> {
        self.repo
            .update_metadata(id, metadata)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Delete a document.
    ///
    /// This removes both the storage object and the database record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Document not found
    /// - Storage deletion fails
    /// - Database deletion fails
    pub async fn delete(&self, id: DocumentId) -> Result<(), DocumentError> {
        let document = self.get(id).await?;

        self.storage.delete(&document.storage_key).await?;

        if !self.repo.delete(id).await? {
            return Err(DocumentError::NotFound(id));
        }
        Ok(())
    }

    /// Fetch a document together with its bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the record or the stored file is missing.
    pub async fn download(&self, id: DocumentId) -> Result<(Document, Bytes), DocumentError> {
        let document = self.get(id).await?;
        let data = self.storage.read(&document.storage_key).await?;
        Ok((document, data))
    }

    /// Storage usage overall and per category.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails.
    pub async fn storage_stats(&self) -> Result<StorageStats, DocumentError> {
        let usage = self.repo.usage_by_category().await?;
        Ok(StorageStats::from_usage(usage))
    }

    /// Upload rules in force.
    #[must_use]
    pub fn rules(&self) -> &UploadRules {
        &self.rules
    }
}
