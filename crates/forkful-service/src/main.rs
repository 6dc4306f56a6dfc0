//! Forkful Service - HTTP API for the recipe-sharing backend
//!
//! This is the main entry point for the forkful service.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forkful_service::{create_router, AppState, ServiceConfig};
use forkful_store::{MemoryStorage, PgStorage, SessionStore, Storage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,forkful_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Forkful Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_configured = %config.database_url.is_some(),
        session_sweep_seconds = %config.session_sweep_seconds,
        "Service configuration loaded"
    );

    // The session store shares the storage engine's lifecycle.
    let sessions =
        SessionStore::with_sweep_interval(Duration::from_secs(config.session_sweep_seconds));

    // Select the storage backend
    let storage: Arc<dyn Storage> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL");
            let store = PgStorage::connect_with_sessions(url, sessions).await?;
            store.run_migrations().await?;
            tracing::info!("Migrations applied");
            Arc::new(store)
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set - using in-memory storage, data will not survive a restart"
            );
            Arc::new(MemoryStorage::with_sessions(sessions))
        }
    };

    // Build app state
    let state = AppState::new(storage, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
