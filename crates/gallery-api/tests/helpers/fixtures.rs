//! Upload payloads for HTTP tests.

use axum_test::multipart::{MultipartForm, Part};

/// 1x1 PNG
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 dimensions
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, //
        0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT chunk
        0x08, 0xD7, 0x63, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, //
        0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, //
        0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82, // IEND chunk
    ]
}

pub fn image_part(file_name: &str, data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_type("application/octet-stream")
}

/// Form with text fields first and the image last.
pub fn upload_form(
    file_name: &str,
    data: Vec<u8>,
    name: &str,
    description: &str,
    author: &str,
) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name.to_string())
        .add_text("description", description.to_string())
        .add_text("author", author.to_string())
        .add_part("image", image_part(file_name, data))
}
