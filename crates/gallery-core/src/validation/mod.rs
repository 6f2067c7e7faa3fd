//! Validation modules
//!
//! Pure checks run before an upload touches the filesystem, plus the
//! sanitizer applied to text fields before they are persisted.

pub mod sanitize;
pub mod upload;

pub use sanitize::sanitize;
pub use upload::{validate_extension, validate_file_path, validate_form_fields, FormFields};
