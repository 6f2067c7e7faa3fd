//! Types used by the ingestion service

use gallery_core::validation::FormFields;
use gallery_core::AppError;
use gallery_storage::{CollectError, StorageError};
use thiserror::Error;

/// The file part of an upload, with its body still unread.
pub struct ImagePart<S> {
    /// Filename as sent by the client. Only its extension is ever used.
    pub file_name: String,
    pub body: S,
}

/// An upload as received from the transport layer.
pub struct UploadRequest<S> {
    pub image: Option<ImagePart<S>>,
    pub fields: FormFields,
}

/// Result of a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    pub id: i64,
    pub file_name: String,
}

/// Progress of one upload through the pipeline.
///
/// `Received → Validated → Stored → Persisted`; a failure records the last
/// stage that was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Received,
    Validated,
    Stored,
    Persisted,
}

/// Why an upload was refused before any side effect happened.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("no image file part")]
    MissingImage,

    #[error("extension of '{file_name}' is not allowed")]
    InvalidExtension { file_name: String },

    #[error("invalid form fields: {}", .0.join("; "))]
    InvalidFields(Vec<String>),

    #[error("generated file name '{0}' failed the path check")]
    InvalidFilename(String),
}

/// What went wrong after validation passed.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("file exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read upload stream: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write file: {0}")]
    Write(#[source] StorageError),

    #[error("failed to insert record: {0}")]
    Insert(#[source] AppError),
}

impl From<CollectError> for FailureCause {
    fn from(err: CollectError) -> Self {
        match err {
            CollectError::PayloadTooLarge { limit } => FailureCause::PayloadTooLarge { limit },
            CollectError::Io(err) => FailureCause::Read(err),
        }
    }
}

/// Outcome of the compensating delete for a file whose record was never committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanup {
    NotNeeded,
    Removed,
    Failed(String),
}

/// Terminal failure of an ingestion.
///
/// Carries everything the caller needs to report the failure: the stage that
/// was reached, the generated name, whether bytes hit the content directory
/// and what happened to them afterwards.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("upload rejected: {0}")]
    Rejected(Rejection),

    #[error("upload failed after {stage:?} for {file_name}: {cause}")]
    Failed {
        stage: IngestStage,
        file_name: String,
        file_written: bool,
        cleanup: Cleanup,
        #[source]
        cause: FailureCause,
    },
}

impl From<Rejection> for IngestError {
    fn from(rejection: Rejection) -> Self {
        IngestError::Rejected(rejection)
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Rejected(Rejection::MissingImage) => {
                AppError::ImageRequired("Please provide an image file".to_string())
            }
            IngestError::Rejected(Rejection::InvalidExtension { .. }) => AppError::InvalidExtension(
                "Invalid file extension. Allowed: jpg, jpeg, png, gif, webp".to_string(),
            ),
            IngestError::Rejected(Rejection::InvalidFields(messages)) => {
                AppError::Validation(messages)
            }
            IngestError::Rejected(Rejection::InvalidFilename(_)) => {
                AppError::InvalidFilename("Invalid filename".to_string())
            }
            IngestError::Failed { cause, .. } => match cause {
                FailureCause::PayloadTooLarge { limit } => AppError::PayloadTooLarge(format!(
                    "File exceeds the maximum size of {} bytes",
                    limit
                )),
                FailureCause::Read(err) => {
                    AppError::Internal(format!("Failed to read upload: {}", err))
                }
                FailureCause::Write(err) => AppError::Storage(err.to_string()),
                FailureCause::Insert(err) => err,
            },
        }
    }
}
