//! Signature template routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use studio_core::signature::{
    RenderedSignature, SignatureService, SignatureTemplate, TemplateInput, TemplateType,
    TemplateUsage,
};
use studio_db::SignatureTemplateRepository;
use studio_shared::types::{DocumentId, SignatureTemplateId, UserId};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the signature template routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/signature-templates",
            get(list_templates).post(create_template),
        )
        .route("/signature-templates/types", get(template_types))
        .route("/signature-templates/usage", get(usage_stats))
        .route("/signature-templates/defaults", post(install_defaults))
        .route(
            "/signature-templates/{id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
        .route("/signature-templates/{id}/render", post(render_template))
        .route("/signature-templates/{id}/preview", get(preview_template))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a template.
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    /// Template fields.
    #[serde(flatten)]
    pub template: TemplateInput,
    /// Author.
    #[serde(default)]
    pub created_by: Option<UserId>,
}

/// Request body for rendering a template.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Placeholder values; override the template defaults.
    pub data: BTreeMap<String, String>,
    /// Document the block is applied to; logged for usage statistics.
    pub document_id: Option<DocumentId>,
}

/// Query for installing the stock templates.
#[derive(Debug, Default, Deserialize)]
pub struct InstallDefaultsQuery {
    /// Author recorded on the new templates.
    pub created_by: Option<UserId>,
}

/// A template type with its label.
#[derive(Debug, Serialize)]
pub struct TemplateTypeResponse {
    /// Stored value.
    pub value: TemplateType,
    /// Display label.
    pub label: &'static str,
}

// ============================================================================
// Route Handlers
// ============================================================================

fn service(state: &AppState) -> SignatureService<SignatureTemplateRepository> {
    SignatureService::new(Arc::new(SignatureTemplateRepository::new(
        (*state.db).clone(),
    )))
}

/// GET `/signature-templates`
async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<SignatureTemplate>>, ApiError> {
    Ok(Json(service(&state).list().await?))
}

/// POST `/signature-templates`
async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let template = service(&state)
        .create(payload.template, payload.created_by)
        .await?;
    info!(template_id = %template.id, name = %template.template_name, "Signature template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET `/signature-templates/types`
async fn template_types() -> Json<Vec<TemplateTypeResponse>> {
    Json(
        SignatureService::<SignatureTemplateRepository>::template_types()
            .into_iter()
            .map(|(value, label)| TemplateTypeResponse { value, label })
            .collect(),
    )
}

/// GET `/signature-templates/usage`
async fn usage_stats(State(state): State<AppState>) -> Result<Json<Vec<TemplateUsage>>, ApiError> {
    Ok(Json(service(&state).usage_stats().await?))
}

/// POST `/signature-templates/defaults`
async fn install_defaults(
    State(state): State<AppState>,
    Query(query): Query<InstallDefaultsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let created = service(&state)
        .install_defaults(query.created_by, Utc::now().date_naive())
        .await?;
    info!(count = created.len(), "Stock signature templates installed");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET `/signature-templates/{id}`
async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<SignatureTemplateId>,
) -> Result<Json<SignatureTemplate>, ApiError> {
    Ok(Json(service(&state).get(id).await?))
}

/// PUT `/signature-templates/{id}`
async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<SignatureTemplateId>,
    Json(input): Json<TemplateInput>,
) -> Result<Json<SignatureTemplate>, ApiError> {
    Ok(Json(service(&state).update(id, input).await?))
}

/// DELETE `/signature-templates/{id}`
async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<SignatureTemplateId>,
) -> Result<StatusCode, ApiError> {
    service(&state).delete(id).await?;
    info!(template_id = %id, "Signature template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/signature-templates/{id}/render`
async fn render_template(
    State(state): State<AppState>,
    Path(id): Path<SignatureTemplateId>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderedSignature>, ApiError> {
    Ok(Json(
        service(&state)
            .render(id, &request.data, request.document_id)
            .await?,
    ))
}

/// GET `/signature-templates/{id}/preview`
async fn preview_template(
    State(state): State<AppState>,
    Path(id): Path<SignatureTemplateId>,
) -> Result<Json<RenderedSignature>, ApiError> {
    Ok(Json(
        service(&state)
            .preview(id, Utc::now().date_naive())
            .await?,
    ))
}
