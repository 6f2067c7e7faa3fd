use crate::traits::{Storage, StorageError, StorageResult, StorageUsage};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// All files live directly inside `base_path`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating `base_path` if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a storage filename to a path inside the content directory.
    ///
    /// Only bare filenames are accepted: anything with `..`, a separator, or
    /// nothing at all is rejected before touching the filesystem.
    fn key_to_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        if file_name.is_empty()
            || file_name.contains("..")
            || file_name.contains('/')
            || file_name.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "File name contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(file_name))
    }

    async fn write_new(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, file_name: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_to_path(file_name)?;
        let size = data.len();
        let start = std::time::Instant::now();

        if let Err(e) = Self::write_new(&path, &data).await {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                return Err(StorageError::AlreadyExists(file_name.to_string()));
            }

            // The file may have been created before the write failed.
            if let Err(remove_err) = fs::remove_file(&path).await {
                if remove_err.kind() != std::io::ErrorKind::NotFound {
                    tracing::error!(
                        path = %path.display(),
                        error = %remove_err,
                        "Failed to remove partially written file"
                    );
                }
            }

            return Err(StorageError::WriteFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            file_name = %file_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(())
    }

    async fn delete(&self, file_name: &str) -> StorageResult<()> {
        let path = self.key_to_path(file_name)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        tracing::info!(
            path = %path.display(),
            file_name = %file_name,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, file_name: &str) -> StorageResult<bool> {
        let path = self.key_to_path(file_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn usage(&self) -> StorageResult<StorageUsage> {
        let mut usage = StorageUsage::default();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => {
                    usage.file_count += 1;
                    usage.total_bytes += metadata.len();
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "Skipping unreadable entry in content directory"
                    );
                }
            }
        }

        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_put_writes_file() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .put("a.png", Bytes::from_static(b"png bytes"))
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("a.png")).unwrap();
        assert_eq!(written, b"png bytes");
        assert!(storage.exists("a.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_local_storage_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("public").join("images");
        let storage = LocalStorage::new(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[tokio::test]
    async fn test_local_storage_never_overwrites() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage.put("a.png", Bytes::from_static(b"first")).await.unwrap();
        let result = storage.put("a.png", Bytes::from_static(b"second")).await;

        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.put("../escape.png", Bytes::new()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("sub\\file.png").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage.put("gone.jpg", Bytes::from_static(b"x")).await.unwrap();
        storage.delete("gone.jpg").await.unwrap();
        assert!(!storage.exists("gone.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        assert!(storage.delete("nonexistent.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_usage() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        assert_eq!(storage.usage().await.unwrap(), StorageUsage::default());

        storage.put("a.png", Bytes::from(vec![0u8; 100])).await.unwrap();
        storage.put("b.gif", Bytes::from(vec![0u8; 50])).await.unwrap();
        std::fs::create_dir(dir.path().join("ignored")).unwrap();

        let usage = storage.usage().await.unwrap();
        assert_eq!(usage.file_count, 2);
        assert_eq!(usage.total_bytes, 150);
    }
}
