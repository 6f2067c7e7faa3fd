//! Gallery API Library
//!
//! HTTP surface of the gallery: the upload and listing endpoints, analytics,
//! the ingestion service behind them, and application setup.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
