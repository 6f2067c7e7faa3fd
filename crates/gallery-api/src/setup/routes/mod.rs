//! Route configuration and setup.
//!
//! Gallery routes live here; health checks in [health](health).

mod health;

use crate::api_doc::ApiDoc;
use crate::error::HttpAppError;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use gallery_core::{AppError, Config};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Room left in the request body for the multipart envelope and text fields.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config);

    let body_limit = config
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    tracing::info!(
        body_limit_bytes = body_limit,
        max_concurrent_requests = config.max_concurrent_requests,
        "Request limits configured"
    );

    let app = Router::new()
        .route("/new", post(handlers::upload::upload_image))
        .route("/all", get(handlers::images::list_images))
        .merge(analytics_routes())
        .merge(health_routes())
        .nest_service("/images", ServeDir::new(&config.content_dir))
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"))
        .fallback(not_found)
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn analytics_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics/summary", get(handlers::analytics::get_summary))
        .route("/analytics/stats", get(handlers::analytics::get_stats))
        .route("/analytics/usage", get(handlers::analytics::get_usage))
        .route("/analytics/authors", get(handlers::analytics::get_authors))
        .route("/analytics/timeline", get(handlers::analytics::get_timeline))
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
}

fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    }
}

async fn not_found() -> HttpAppError {
    HttpAppError::from(AppError::NotFound("Route not found".to_string()))
}
