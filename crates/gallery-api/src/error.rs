//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. An [`HttpAppError`]
//! wraps an [`AppError`] and, for failures tied to a specific endpoint, the
//! [`Operation`] that was running so server-side failures render with that
//! operation's stable code (`upload_failed`, `fetch_failed`, `analytics_failed`).

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gallery_core::config::is_production_name;
use gallery_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response.
///
/// Exactly one of `message` and `messages` is present.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Individual validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

/// Endpoint family an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Fetch,
    Analytics,
}

impl Operation {
    pub fn failure_code(self) -> &'static str {
        match self {
            Operation::Upload => "upload_failed",
            Operation::Fetch => "fetch_failed",
            Operation::Analytics => "analytics_failed",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Upload => "Failed to upload image",
            Operation::Fetch => "Failed to fetch images",
            Operation::Analytics => "Failed to load analytics",
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from gallery-core)
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub operation: Option<Operation>,
}

impl HttpAppError {
    /// Tag the error with the operation that produced it.
    pub fn during(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Status and body for this error.
    ///
    /// Client errors always carry their own message. Server errors carry the
    /// detailed error chain outside production and a generic message in it.
    pub fn render(&self, production: bool) -> (StatusCode, ErrorResponse) {
        let app_error = &self.error;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !app_error.is_server_error() {
            let body = match app_error.messages() {
                Some(messages) => ErrorResponse {
                    error: app_error.error_code().to_string(),
                    message: None,
                    messages: Some(messages.to_vec()),
                },
                None => ErrorResponse {
                    error: app_error.error_code().to_string(),
                    message: Some(app_error.client_message()),
                    messages: None,
                },
            };
            return (status, body);
        }

        let code = self
            .operation
            .map(Operation::failure_code)
            .unwrap_or_else(|| app_error.error_code());

        let message = if production {
            self.operation
                .map(|op| op.failure_message().to_string())
                .unwrap_or_else(|| app_error.client_message())
        } else {
            app_error.detailed_message()
        };

        (
            status,
            ErrorResponse {
                error: code.to_string(),
                message: Some(message),
                messages: None,
            },
        )
    }
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError {
            error,
            operation: None,
        }
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError::from(AppError::from(err))
    }
}

/// Requests that are not `multipart/form-data` never reach the upload pipeline.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError::from(AppError::InvalidInput(format!(
            "Invalid multipart request: {}",
            rejection.body_text()
        )))
    }
}

fn log_error(error: &HttpAppError) {
    let app_error = &error.error;
    let error_type = app_error.error_type();
    let operation = error.operation.map(Operation::failure_code);
    match app_error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %app_error, error_type, ?operation, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %app_error, error_type, ?operation, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %app_error.detailed_message(),
                error_type,
                ?operation,
                "Request failed"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| is_production_name(&env))
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        log_error(&self);
        let (status, body) = self.render(is_production_env());
        (status, Json(body)).into_response()
    }
}
