//! Upload validation
//!
//! - Extension check against [`ALLOWED_EXTENSIONS`]
//! - Length limits on the optional text fields
//! - Safety check on server-generated storage names

use crate::constants::{ALLOWED_EXTENSIONS, MAX_FIELD_LENGTH};

/// Optional text fields sent alongside the uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// Lower-cased extension of `filename` including the leading dot, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rfind('.')
        .map(|idx| filename[idx..].to_lowercase())
}

/// Whether `filename` ends in one of the allowed image extensions.
///
/// Only the suffix after the last `.` is considered, case-insensitively.
pub fn validate_extension(filename: &str) -> bool {
    match extension_of(filename) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// Collect one message per field that exceeds [`MAX_FIELD_LENGTH`] characters.
///
/// An empty list means the fields are acceptable.
pub fn validate_form_fields(fields: &FormFields) -> Vec<String> {
    let checks = [
        ("Name", &fields.name),
        ("Description", &fields.description),
        ("Author", &fields.author),
    ];

    checks
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| v.chars().count() > MAX_FIELD_LENGTH)
                .map(|_| format!("{} is too long (max {} characters)", label, MAX_FIELD_LENGTH))
        })
        .collect()
}

/// Reject names containing `..` or a path separator.
pub fn validate_file_path(candidate: &str) -> bool {
    !(candidate.contains("..") || candidate.contains('/') || candidate.contains('\\'))
}
