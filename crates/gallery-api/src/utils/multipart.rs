//! Multipart adapter for the upload endpoint
//!
//! Turns an `axum` [`Multipart`] body into an [`UploadRequest`]. The `image`
//! part is spooled to an anonymous temporary file and handed to the ingestion
//! service as a chunk stream, so the request body is never buffered whole.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use gallery_core::validation::{validate_extension, FormFields};
use gallery_core::AppError;
use std::io::SeekFrom;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::services::ingest::{ImagePart, UploadRequest};

/// Chunk stream over a spooled upload.
pub type SpooledBody = ReaderStream<tokio::fs::File>;

const IMAGE_FIELD: &str = "image";

/// Read the upload form.
///
/// At most `max_file_size + 1` bytes of the image are kept; anything beyond
/// is left unread so the collector sees the overflow and rejects the upload.
/// Only the first `image` part that carries a filename is used, and its bytes
/// are skipped when the filename has a disallowed extension.
pub async fn read_upload_form(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<UploadRequest<SpooledBody>, AppError> {
    let mut fields = FormFields::default();
    let mut image: Option<ImagePart<SpooledBody>> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            IMAGE_FIELD if image.is_none() && field.file_name().is_some() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                // Rejected by extension before any byte is read, so nothing to keep.
                let cap = if validate_extension(&file_name) {
                    max_file_size.saturating_add(1)
                } else {
                    0
                };
                let body = spool_field(field, cap).await?;
                image = Some(ImagePart { file_name, body });
            }
            "name" => fields.name = Some(field.text().await.map_err(multipart_error)?),
            "description" => {
                fields.description = Some(field.text().await.map_err(multipart_error)?)
            }
            "author" => fields.author = Some(field.text().await.map_err(multipart_error)?),
            other => {
                tracing::debug!(field = %other, "Ignoring multipart field");
            }
        }
    }

    Ok(UploadRequest { image, fields })
}

async fn spool_field(mut field: Field<'_>, cap: usize) -> Result<SpooledBody, AppError> {
    let file = tempfile::tempfile()?;
    let mut file = tokio::fs::File::from_std(file);
    let mut written: usize = 0;

    while written < cap {
        let Some(chunk) = field.chunk().await.map_err(multipart_error)? else {
            break;
        };
        let take = chunk.len().min(cap - written);
        file.write_all(&chunk[..take]).await?;
        written += take;
    }

    file.flush().await?;
    file.seek(SeekFrom::Start(0)).await?;
    Ok(ReaderStream::new(file))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}
