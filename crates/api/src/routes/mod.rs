//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod analytics;
pub mod documents;
pub mod health;
pub mod signatures;

#[cfg(test)]
mod tests;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(analytics::routes())
        .merge(documents::routes())
        .merge(signatures::routes())
}
