//! Analytics endpoints. Every response is wrapped as `{ "success": true, "data": ... }`.

use crate::error::{ErrorResponse, HttpAppError, Operation};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use gallery_core::models::{
    AnalyticsSummary, AuthorStats, DataResponse, GalleryStats, TimelineDay, UsageBucket,
    UsagePeriod,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsageQuery {
    /// `hourly`, `daily`, `weekly` or `monthly`; anything else means `daily`
    pub period: Option<String>,
}

fn analytics_error(err: gallery_core::AppError) -> HttpAppError {
    HttpAppError::from(err).during(Operation::Analytics)
}

#[utoipa::path(
    get,
    path = "/analytics/summary",
    tag = "analytics",
    responses(
        (status = 200, description = "Gallery summary", body = AnalyticsSummary),
        (status = 500, description = "Failed to load analytics", body = ErrorResponse)
    )
)]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let summary = state.analytics.summary().await.map_err(analytics_error)?;
    Ok(Json(DataResponse::new(summary)))
}

#[utoipa::path(
    get,
    path = "/analytics/stats",
    tag = "analytics",
    responses(
        (status = 200, description = "Database and storage statistics", body = GalleryStats),
        (status = 500, description = "Failed to load analytics", body = ErrorResponse)
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stats = state.analytics.stats().await.map_err(analytics_error)?;
    Ok(Json(DataResponse::new(stats)))
}

#[utoipa::path(
    get,
    path = "/analytics/usage",
    tag = "analytics",
    params(UsageQuery),
    responses(
        (status = 200, description = "Uploads per time bucket, oldest first", body = Vec<UsageBucket>),
        (status = 500, description = "Failed to load analytics", body = ErrorResponse)
    )
)]
pub async fn get_usage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsageQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let period = UsagePeriod::parse_lenient(query.period.as_deref());
    let buckets = state
        .analytics
        .usage(period)
        .await
        .map_err(analytics_error)?;
    Ok(Json(DataResponse::new(buckets)))
}

#[utoipa::path(
    get,
    path = "/analytics/authors",
    tag = "analytics",
    responses(
        (status = 200, description = "Per-author statistics", body = Vec<AuthorStats>),
        (status = 500, description = "Failed to load analytics", body = ErrorResponse)
    )
)]
pub async fn get_authors(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let authors = state.analytics.authors().await.map_err(analytics_error)?;
    Ok(Json(DataResponse::new(authors)))
}

#[utoipa::path(
    get,
    path = "/analytics/timeline",
    tag = "analytics",
    responses(
        (status = 200, description = "Uploads per day, newest first", body = Vec<TimelineDay>),
        (status = 500, description = "Failed to load analytics", body = ErrorResponse)
    )
)]
pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let days = state.analytics.timeline().await.map_err(analytics_error)?;
    Ok(Json(DataResponse::new(days)))
}
