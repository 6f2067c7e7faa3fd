//! Limits shared by validation, storage, and configuration.

/// Image extensions accepted for upload (lower-case, with leading dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Maximum length, in characters, of the `name`, `description`, and `author` fields.
pub const MAX_FIELD_LENGTH: usize = 500;

/// Default ceiling for a single uploaded file (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 50 * 1024 * 1024;

/// Default size of the record store connection pool.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Default content directory, relative to the working directory.
pub const DEFAULT_CONTENT_DIR: &str = "public/images";
