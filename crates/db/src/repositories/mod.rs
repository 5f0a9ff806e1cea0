//! Repository abstractions for data access.
//!
//! Repositories implement the persistence traits of `studio-core` over
//! `SeaORM`, hiding the query details from the rest of the application.

pub mod analytics;
pub mod document;
pub mod signature;

pub use analytics::AnalyticsRepository;
pub use document::DocumentRepository;
pub use signature::SignatureTemplateRepository;
