//! Document management routes.
//!
//! Uploads arrive as `multipart/form-data` with a `file` part and optional
//! metadata parts named after the [`DocumentMetadata`] fields.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use studio_core::documents::{
    Document, DocumentFilter, DocumentMetadata, DocumentService, StorageStats, UploadInput,
    UploadRules, categories, document_types,
};
use studio_db::DocumentRepository;
use studio_shared::AppError;
use studio_shared::types::{ClientId, DocumentId, ProjectId, UserId};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(upload_document))
        .route("/documents/stats", get(storage_stats))
        .route("/documents/catalog", get(catalog))
        .route(
            "/documents/{id}",
            get(get_document)
                .put(update_document)
                .delete(delete_document),
        )
        .route("/documents/{id}/download", get(download_document))
}

// ============================================================================
// Response Types
// ============================================================================

/// Key and display label of a catalogue entry.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    /// Stored key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Categories, document types and upload limits.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Document categories.
    pub categories: Vec<CatalogEntry>,
    /// Document types.
    pub document_types: Vec<CatalogEntry>,
    /// Largest accepted upload in bytes.
    pub max_file_size: u64,
    /// Accepted extensions.
    pub allowed_extensions: Vec<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn service(state: &AppState) -> DocumentService<DocumentRepository> {
    let repo = DocumentRepository::new((*state.db).clone());
    DocumentService::new(
        state.storage.clone(),
        Arc::new(repo),
        UploadRules::from(state.documents.as_ref()),
    )
}

fn entries(pairs: &'static [(&'static str, &'static str)]) -> Vec<CatalogEntry> {
    pairs
        .iter()
        .map(|&(key, label)| CatalogEntry { key, label })
        .collect()
}

/// Content type served for a stored extension.
fn content_type(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

fn parse_id<T: std::str::FromStr>(field: &str, value: &str) -> Result<Option<T>, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("invalid {field}: '{value}'")).into())
}

fn bad_multipart(err: &axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text()).into();
    }
    AppError::Validation(format!("invalid multipart body: {err}")).into()
}

/// Reads the file part and metadata parts of an upload form.
async fn read_upload(mut multipart: Multipart) -> Result<UploadInput, ApiError> {
    let mut file = None;
    let mut metadata = DocumentMetadata::default();
    let mut uploaded_by = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_multipart(&e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let original_name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation("file part has no file name".into()))?;
            let data = field.bytes().await.map_err(|e| bad_multipart(&e))?;
            file = Some((original_name, data));
            continue;
        }

        let value = field.text().await.map_err(|e| bad_multipart(&e))?;
        match name.as_str() {
            "document_type" if !value.trim().is_empty() => metadata.document_type = value,
            "category" if !value.trim().is_empty() => metadata.category = value,
            "description" => metadata.description = value,
            "tags" => metadata.tags = value,
            "client_id" => metadata.client_id = parse_id::<ClientId>(&name, &value)?,
            "project_id" => metadata.project_id = parse_id::<ProjectId>(&name, &value)?,
            "uploaded_by" => uploaded_by = parse_id::<UserId>(&name, &value)?,
            _ => {}
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| AppError::Validation("missing 'file' part".into()))?;

    Ok(UploadInput {
        original_name,
        data,
        metadata,
        uploaded_by,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/documents`
async fn list_documents(
    State(state): State<AppState>,
    Query(filter): Query<DocumentFilter>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(service(&state).list(filter).await?))
}

/// POST `/documents`
async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let input = read_upload(multipart).await?;
    let document = service(&state).upload(input).await?;

    info!(
        document_id = %document.id,
        original_name = %document.original_name,
        file_size = document.file_size,
        "Document uploaded"
    );

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET `/documents/stats`
async fn storage_stats(State(state): State<AppState>) -> Result<Json<StorageStats>, ApiError> {
    Ok(Json(service(&state).storage_stats().await?))
}

/// GET `/documents/catalog`
async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: entries(categories()),
        document_types: entries(document_types()),
        max_file_size: state.documents.max_file_size,
        allowed_extensions: state.documents.allowed_extensions.clone(),
    })
}

/// GET `/documents/{id}`
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(service(&state).get(id).await?))
}

/// PUT `/documents/{id}`
async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
    Json(metadata): Json<DocumentMetadata>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(service(&state).update_metadata(id, metadata).await?))
}

/// DELETE `/documents/{id}`
async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<StatusCode, ApiError> {
    service(&state).delete(id).await?;
    info!(document_id = %id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/documents/{id}/download`
async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<impl IntoResponse, ApiError> {
    let (document, bytes) = service(&state).download(id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        document.original_name.replace(['"', '\\'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type(&document.file_type).to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
