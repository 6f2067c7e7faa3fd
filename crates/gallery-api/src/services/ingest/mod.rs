//! Upload ingestion: validation, bounded collection, storage and record
//! insertion, with compensating cleanup when the insert fails.

mod service;
mod types;

pub use service::IngestService;
pub use types::{
    Cleanup, FailureCause, ImagePart, IngestError, IngestReceipt, IngestStage, Rejection,
    UploadRequest,
};
