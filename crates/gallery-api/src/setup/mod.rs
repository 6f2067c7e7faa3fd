//! Application setup and initialization
//!
//! Builds every long-lived component from a [`Config`]: telemetry, the
//! database pool, the content directory, the shared [`AppState`] and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use gallery_core::Config;
use gallery_db::{Database, PgAnalyticsRepository, PgImageRepository};
use std::sync::Arc;

/// Initialize the entire application.
///
/// The returned [`Database`] is owned by the caller, which closes it after the
/// server has stopped.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router, Database)> {
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let database = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = AppState::new(
        config.clone(),
        storage,
        Arc::new(PgImageRepository::new(database.pool().clone())),
        Arc::new(PgAnalyticsRepository::new(database.pool().clone())),
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router, database))
}
