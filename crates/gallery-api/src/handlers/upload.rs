use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use gallery_core::models::UploadResponse;
use gallery_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, Operation};
use crate::state::AppState;
use crate::utils::multipart::read_upload_form;

/// Upload image handler
///
/// Accepts a multipart form with an `image` file part and optional `name`,
/// `description` and `author` text fields, and hands it to the ingestion
/// service. The stored file gets a generated `<uuid>.<ext>` name.
///
/// # Errors
/// - `image required` - no file part
/// - `invalid_extension` - extension is not jpg, jpeg, png, gif or webp
/// - `validation_error` - a text field is longer than 500 characters
/// - `payload_too_large` - file exceeds the configured maximum
/// - `upload_failed` - storage or database failure
#[utoipa::path(
    post,
    path = "/new",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded successfully", body = UploadResponse),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart.map_err(|e| HttpAppError::from(e).during(Operation::Upload))?;

    let request = read_upload_form(multipart, state.ingest.max_file_size())
        .await
        .map_err(|e| HttpAppError::from(e).during(Operation::Upload))?;

    let receipt = state
        .ingest
        .ingest(request)
        .await
        .map_err(|e| HttpAppError::from(AppError::from(e)).during(Operation::Upload))?;

    Ok(Json(UploadResponse::new(receipt.id, receipt.file_name)))
}
