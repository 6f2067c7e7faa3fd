//! Storage abstraction trait
//!
//! This module defines the Storage trait that the upload pipeline and the
//! analytics endpoints use to reach the content directory.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid file name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File count and total size of the content directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageUsage {
    pub file_count: u64,
    pub total_bytes: u64,
}

/// Storage abstraction trait
///
/// Files are addressed by their bare storage filename. Implementations must
/// never overwrite an existing file and must not leave a partial file behind
/// when [`Storage::put`] fails.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `file_name`.
    async fn put(&self, file_name: &str, data: Bytes) -> StorageResult<()>;

    /// Remove `file_name`. Removing a missing file is not an error.
    async fn delete(&self, file_name: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, file_name: &str) -> StorageResult<bool>;

    /// Count and size of all stored files.
    async fn usage(&self) -> StorageResult<StorageUsage>;
}
