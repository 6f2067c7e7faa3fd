//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use gallery_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gallery API",
        version = "0.1.0",
        description = "Photo gallery upload service. Images are stored under generated names in a flat content directory and described by records in PostgreSQL."
    ),
    paths(
        handlers::upload::upload_image,
        handlers::images::list_images,
        handlers::analytics::get_summary,
        handlers::analytics::get_stats,
        handlers::analytics::get_usage,
        handlers::analytics::get_authors,
        handlers::analytics::get_timeline,
    ),
    components(schemas(
        error::ErrorResponse,
        models::ImageRecord,
        models::UploadResponse,
        models::ImageListResponse,
        models::DatabaseStats,
        models::StorageStats,
        models::GalleryStats,
        models::UsagePeriod,
        models::UsageBucket,
        models::AuthorStats,
        models::TimelineDay,
        models::DateRange,
        models::SummaryTotals,
        models::FieldLengthInfo,
        models::AnalyticsSummary,
    )),
    tags(
        (name = "images", description = "Upload and list gallery images"),
        (name = "analytics", description = "Upload and storage statistics")
    )
)]
pub struct ApiDoc;
