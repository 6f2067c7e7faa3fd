//! Configuration validation
//!
//! Runs once at startup so misconfiguration fails fast instead of surfacing on
//! the first request.

use anyhow::Result;
use gallery_core::Config;

const LARGE_UPLOAD_WARN_BYTES: usize = 512 * 1024 * 1024;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        let env_var = std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("APP_ENV"))
            .ok();
        if env_var.is_none() {
            tracing::warn!(
                "Production mode configured but ENVIRONMENT/APP_ENV not set - error details may leak"
            );
        }
    }

    if config.max_file_size_bytes > LARGE_UPLOAD_WARN_BYTES {
        tracing::warn!(
            max_file_size_bytes = config.max_file_size_bytes,
            "Maximum upload size is very large; uploads are held in memory before writing"
        );
    }

    if config.content_dir.is_relative() {
        tracing::debug!(
            content_dir = %config.content_dir.display(),
            "Content directory is relative to the working directory"
        );
    }

    Ok(())
}
