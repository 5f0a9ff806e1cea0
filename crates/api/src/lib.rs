//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for analytics, documents and signature templates
//! - Error responses built from `AppError`

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use studio_core::storage::StorageService;
use studio_shared::DocumentsConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Multipart framing on top of the largest accepted file.
const UPLOAD_OVERHEAD: u64 = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Storage service for uploaded documents.
    pub storage: Arc<StorageService>,
    /// Upload rules.
    pub documents: Arc<DocumentsConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.documents.max_file_size.saturating_add(UPLOAD_OVERHEAD))
        .unwrap_or(usize::MAX);

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
