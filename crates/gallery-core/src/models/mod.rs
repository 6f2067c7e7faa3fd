//! Data models for the application
//!
//! Persisted entities, their API response envelopes, and analytics aggregates.

mod analytics;
mod image;

pub use analytics::*;
pub use image::*;
