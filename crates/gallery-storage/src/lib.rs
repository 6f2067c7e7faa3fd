//! Gallery Storage Library
//!
//! This crate owns everything that touches the content directory: the
//! [`Storage`] abstraction, its local filesystem implementation, generation of
//! storage filenames, and the bounded collector that turns an upload stream
//! into bytes.
//!
//! # Storage layout
//!
//! The content directory is flat. Every stored file is named
//! `<uuid>.<ext>`; there are no subdirectories and no sidecar files. Names
//! containing `..` or a path separator are rejected by every backend.

pub mod collect;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use collect::{collect_stream, CollectError};
pub use keys::generate_file_name;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StorageUsage};
