//! Upload ingestion service
//!
//! Runs one upload through validate → collect → write → insert, and removes the
//! written file again when the record cannot be committed.

use std::error::Error as StdError;
use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use gallery_core::models::NewImage;
use gallery_core::validation::upload::extension_of;
use gallery_core::validation::{
    sanitize, validate_extension, validate_file_path, validate_form_fields,
};
use gallery_db::ImageRepository;
use gallery_storage::{collect_stream, generate_file_name, Storage, StorageError};

use super::types::{
    Cleanup, FailureCause, IngestError, IngestReceipt, IngestStage, Rejection, UploadRequest,
};

/// Ingestion orchestrator shared by all upload requests.
///
/// Holds no per-request state; concurrent uploads only meet in the content
/// directory (under distinct generated names) and in the record store.
#[derive(Clone)]
pub struct IngestService {
    storage: Arc<dyn Storage>,
    images: Arc<dyn ImageRepository>,
    max_file_size: usize,
}

impl IngestService {
    pub fn new(
        storage: Arc<dyn Storage>,
        images: Arc<dyn ImageRepository>,
        max_file_size: usize,
    ) -> Self {
        Self {
            storage,
            images,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Ingest one upload.
    ///
    /// Rejections happen before anything is written. Once the file is on disk a
    /// failed insert always triggers a delete of that file; if the delete fails
    /// too it is logged and the insert failure is still what gets returned.
    pub async fn ingest<S, E>(&self, request: UploadRequest<S>) -> Result<IngestReceipt, IngestError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        let UploadRequest { image, fields } = request;

        // Received
        let Some(image) = image else {
            tracing::warn!("Image upload attempt without file");
            return Err(Rejection::MissingImage.into());
        };

        let extension = match extension_of(&image.file_name) {
            Some(ext) if validate_extension(&image.file_name) => ext,
            _ => {
                tracing::warn!(file_name = %image.file_name, "Invalid image extension");
                return Err(Rejection::InvalidExtension {
                    file_name: image.file_name,
                }
                .into());
            }
        };

        let field_errors = validate_form_fields(&fields);
        if !field_errors.is_empty() {
            tracing::warn!(errors = ?field_errors, "Form validation failed");
            return Err(Rejection::InvalidFields(field_errors).into());
        }

        // Validated
        let file_name = generate_file_name(&extension);
        if !validate_file_path(&file_name) {
            tracing::error!(file_name = %file_name, "Suspicious generated file name");
            return Err(Rejection::InvalidFilename(file_name).into());
        }

        let data = collect_stream(image.body, self.max_file_size)
            .await
            .map_err(|e| IngestError::Failed {
                stage: IngestStage::Validated,
                file_name: file_name.clone(),
                file_written: false,
                cleanup: Cleanup::NotNeeded,
                cause: FailureCause::from(e),
            })?;
        let size_bytes = data.len();

        let mut guard = OrphanGuard::new(self.storage.clone(), file_name.clone());
        if let Err(e) = self.storage.put(&file_name, data).await {
            // The backend removes partial writes itself; an existing file is not ours.
            guard.disarm();
            tracing::error!(error = %e, file_name = %file_name, "Failed to write image");
            return Err(IngestError::Failed {
                stage: IngestStage::Validated,
                file_name,
                file_written: false,
                cleanup: Cleanup::NotNeeded,
                cause: FailureCause::Write(e),
            });
        }

        // Stored
        tracing::info!(file_name = %file_name, size_bytes, "Image saved");

        let record = NewImage {
            name: sanitize(fields.name.as_deref()),
            description: sanitize(fields.description.as_deref()),
            author: sanitize(fields.author.as_deref()),
            path: file_name.clone(),
        };

        match self.images.insert(record).await {
            Ok(inserted) => {
                guard.disarm();
                // Persisted
                tracing::info!(id = inserted.id, file_name = %file_name, "Image record inserted");
                Ok(IngestReceipt {
                    id: inserted.id,
                    file_name,
                })
            }
            Err(insert_err) => {
                tracing::error!(
                    error = %insert_err,
                    file_name = %file_name,
                    "Failed to insert image record"
                );
                // Stays armed until the delete finishes so a cancelled cleanup is retried.
                let cleanup = remove_orphan(self.storage.as_ref(), &file_name).await;
                guard.disarm();
                Err(IngestError::Failed {
                    stage: IngestStage::Stored,
                    file_name,
                    file_written: true,
                    cleanup,
                    cause: FailureCause::Insert(insert_err),
                })
            }
        }
    }
}

async fn remove_orphan(storage: &dyn Storage, file_name: &str) -> Cleanup {
    match storage.delete(file_name).await {
        Ok(()) => {
            tracing::info!(file_name = %file_name, "Removed file after failed insert");
            Cleanup::Removed
        }
        Err(e) => {
            log_cleanup_failure(&e, file_name);
            Cleanup::Failed(e.to_string())
        }
    }
}

fn log_cleanup_failure(err: &StorageError, file_name: &str) {
    tracing::error!(
        error = %err,
        file_name = %file_name,
        "Failed to clean up orphaned file"
    );
}

/// Deletes the file in the background if the upload future is dropped between
/// the start of the write and the end of the insert or of its compensating delete.
struct OrphanGuard {
    storage: Arc<dyn Storage>,
    file_name: String,
    armed: bool,
}

impl OrphanGuard {
    fn new(storage: Arc<dyn Storage>, file_name: String) -> Self {
        Self {
            storage,
            file_name,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for OrphanGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::error!(file_name = %self.file_name, "Upload cancelled without a runtime; file may be orphaned");
            return;
        };

        let storage = self.storage.clone();
        let file_name = std::mem::take(&mut self.file_name);
        tracing::warn!(file_name = %file_name, "Upload cancelled after write; removing file");
        handle.spawn(async move {
            if let Err(e) = storage.delete(&file_name).await {
                log_cleanup_failure(&e, &file_name);
            }
        });
    }
}
