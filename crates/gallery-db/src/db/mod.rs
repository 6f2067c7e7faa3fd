//! Database repositories for data access layer
//
// Pool construction and migrations
pub mod pool;
//
// Image records (insert and listing)
pub mod image;
//
// Read-only aggregate queries over the images table
pub mod analytics;
