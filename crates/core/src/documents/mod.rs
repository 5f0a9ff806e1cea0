//! Document manager.
//!
//! Validates uploads against an extension allow-list and size limit, writes
//! the bytes through [`crate::storage::StorageService`] and keeps a metadata
//! record per file.

mod catalog;
mod error;
mod service;
mod types;
mod validation;


pub use catalog::{CATEGORIES, DOCUMENT_TYPES, categories, document_types};
pub use error::DocumentError;
pub use service::{DocumentRepository, DocumentService};
pub use types::{
    CategoryStats, CategoryUsage, Document, DocumentFilter, DocumentMetadata, NewDocument,
    StorageStats, StorageTotals, UploadInput,
};
pub use validation::{UploadRules, stored_file_name};
