//! Content directory setup

use anyhow::{Context, Result};
use gallery_core::Config;
use gallery_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the content directory if needed and return the storage backend over it.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.content_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare content directory {}",
                config.content_dir.display()
            )
        })?;

    tracing::info!(
        content_dir = %storage.base_path().display(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
