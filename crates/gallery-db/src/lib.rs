//! Gallery Database Library
//!
//! Connection pool lifecycle, migrations, and the PostgreSQL repositories for
//! image records and analytics aggregates. Every statement binds its values
//! through positional placeholders; no SQL is built from request data.

pub mod db;

pub use db::analytics::{AnalyticsRepository, PgAnalyticsRepository, TIMELINE_DAYS};
pub use db::image::{ImageRepository, PgImageRepository};
pub use db::pool::Database;
