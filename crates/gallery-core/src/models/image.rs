use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A committed gallery image.
///
/// `path` is always a server-generated `<uuid>.<ext>` name inside the content
/// directory; it is never derived from the client filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ImageRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub author: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// Sanitized values for a record that is about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub name: String,
    pub description: String,
    pub author: String,
    pub path: String,
}

/// Body returned by a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_name: String,
    pub id: i64,
    pub message: String,
}

impl UploadResponse {
    pub fn new(id: i64, file_name: String) -> Self {
        Self {
            success: true,
            file_name,
            id,
            message: "Image uploaded successfully".to_string(),
        }
    }
}

/// Body returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<ImageRecord>,
}

impl From<Vec<ImageRecord>> for ImageListResponse {
    fn from(data: Vec<ImageRecord>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Generic `{ success: true, data }` envelope used by the read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
