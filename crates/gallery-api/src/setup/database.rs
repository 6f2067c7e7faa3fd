//! Database setup and initialization

use anyhow::{Context, Result};
use gallery_core::Config;
use gallery_db::Database;

/// Open the connection pool and apply pending migrations.
pub async fn setup_database(config: &Config) -> Result<Database> {
    Database::connect(config)
        .await
        .context("Failed to initialize database")
}
