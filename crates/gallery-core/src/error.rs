//! Error types module
//!
//! All gallery failures are unified under [`AppError`]. Each variant describes
//! how it should be presented to HTTP clients through [`ErrorMetadata`], so the
//! API layer never has to match on variants to pick a status code.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for client mistakes worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable error code (e.g. "invalid_extension")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Image required: {0}")]
    ImageRequired(String),

    #[error("Invalid extension: {0}")]
    InvalidExtension(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "database_error", true, LogLevel::Error),
        AppError::Storage(_) => (500, "storage_error", true, LogLevel::Error),
        AppError::ImageRequired(_) => (400, "image required", false, LogLevel::Warn),
        AppError::InvalidExtension(_) => (400, "invalid_extension", false, LogLevel::Warn),
        AppError::Validation(_) => (400, "validation_error", false, LogLevel::Warn),
        AppError::InvalidFilename(_) => (400, "invalid_filename", false, LogLevel::Error),
        AppError::PayloadTooLarge(_) => (413, "payload_too_large", false, LogLevel::Warn),
        AppError::InvalidInput(_) => (400, "invalid_input", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "not_found", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "internal_error", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "internal_error", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::ImageRequired(_) => "ImageRequired",
            AppError::InvalidExtension(_) => "InvalidExtension",
            AppError::Validation(_) => "Validation",
            AppError::InvalidFilename(_) => "InvalidFilename",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Whether the failure was caused by the server rather than the request.
    pub fn is_server_error(&self) -> bool {
        self.http_status_code() >= 500
    }

    /// Individual validation messages, when the error carries a list of them.
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            AppError::Validation(messages) => Some(messages),
            _ => None,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::ImageRequired(ref msg) => msg.clone(),
            AppError::InvalidExtension(ref msg) => msg.clone(),
            AppError::Validation(ref messages) => messages.join("; "),
            AppError::InvalidFilename(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_use_stable_codes() {
        let cases = [
            (AppError::ImageRequired("x".into()), 400, "image required"),
            (AppError::InvalidExtension("x".into()), 400, "invalid_extension"),
            (AppError::Validation(vec!["x".into()]), 400, "validation_error"),
            (AppError::InvalidFilename("x".into()), 400, "invalid_filename"),
            (AppError::PayloadTooLarge("x".into()), 413, "payload_too_large"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.http_status_code(), status);
            assert_eq!(err.error_code(), code);
            assert!(!err.is_server_error());
            assert!(!err.is_sensitive());
        }
    }

    #[test]
    fn server_errors_are_sensitive() {
        let err = AppError::Storage("disk full at /var/lib/gallery".into());
        assert!(err.is_server_error());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to access storage");
    }

    #[test]
    fn validation_messages_are_exposed() {
        let err = AppError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.messages(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(err.to_string(), "Validation failed: a; b");
        assert!(AppError::NotFound("x".into()).messages().is_none());
    }

    #[test]
    fn detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("connection reset").context("insert failed");
        let err = AppError::from(source);
        let details = err.detailed_message();
        assert!(details.contains("insert failed"));
        assert!(details.contains("Caused by: connection reset"));
    }
}
