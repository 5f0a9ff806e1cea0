//! Mapping of domain errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use studio_core::analytics::AnalyticsError;
use studio_core::documents::DocumentError;
use studio_core::signature::SignatureError;
use studio_core::storage::StorageError;
use studio_shared::AppError;
use tracing::error;

/// Error returned by handlers.
///
/// Renders as `{"error": code, "message": text}` with the status of the
/// wrapped [`AppError`]. Server-side details are logged, not returned.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// The wrapped application error.
    #[must_use]
    pub fn inner(&self) -> &AppError {
        &self.0
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        Self(match err {
            AnalyticsError::InvalidDateRange { .. } => AppError::Validation(err.to_string()),
            AnalyticsError::Source(msg) => AppError::Database(msg),
        })
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        Self(match err {
            DocumentError::EmptyUpload => AppError::Validation(err.to_string()),
            DocumentError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            DocumentError::ExtensionNotAllowed { .. } => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            DocumentError::NotFound(_) | DocumentError::Storage(StorageError::NotFound { .. }) => {
                AppError::NotFound(err.to_string())
            }
            DocumentError::Storage(e) => AppError::Storage(e.to_string()),
            DocumentError::Repository(msg) => AppError::Database(msg),
        })
    }
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        Self(match err {
            SignatureError::NotFound(_) => AppError::NotFound(err.to_string()),
            SignatureError::Validation(msg) => AppError::Validation(msg),
            SignatureError::Repository(msg) => AppError::Database(msg),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}
