use crate::error::{ErrorResponse, HttpAppError, Operation};
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use gallery_core::models::ImageListResponse;
use std::sync::Arc;

/// List every image record, newest first.
#[utoipa::path(
    get,
    path = "/all",
    tag = "images",
    responses(
        (status = 200, description = "All image records", body = ImageListResponse),
        (status = 500, description = "Failed to fetch images", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_images"))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let records = state
        .images
        .list_newest_first()
        .await
        .map_err(|e| HttpAppError::from(e).during(Operation::Fetch))?;

    tracing::debug!(count = records.len(), "Listed images");
    Ok(Json(ImageListResponse::from(records)))
}
