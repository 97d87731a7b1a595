// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dataset_service::DatasetService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::equipment_api_repository::EquipmentApiRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(EquipmentApiRepository::new(
        app_config.api.base_url.clone(),
        app_config.api.username,
        app_config.api.password,
        Duration::from_secs(app_config.api.timeout_secs),
    )?);

    // Create services (application layer)
    let dataset_service = DatasetService::new(repository, app_config.scoring);
    let state = Arc::new(AppState::new(dataset_service));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind))?;
    tracing::info!(
        "Starting equipment-analytics service on {} (equipment API at {})",
        addr,
        app_config.api.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
