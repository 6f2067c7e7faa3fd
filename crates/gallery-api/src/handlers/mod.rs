pub mod analytics;
pub mod images;
pub mod upload;
