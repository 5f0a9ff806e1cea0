//! Studio back office API server.
//!
//! Main entry point for the analytics, document and signature services.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_api::{AppState, create_router};
use studio_core::storage::StorageService;
use studio_db::connect_with;
use studio_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio=debug,studio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(max_connections = config.database.max_connections, "Connected to database");

    let storage = StorageService::from_settings(&config.storage)
        .context("Failed to configure document storage")?;
    info!(provider = storage.provider_name(), "Document storage configured");

    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
        documents: Arc::new(config.documents.clone()),
    };

    let app = create_router(state);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
