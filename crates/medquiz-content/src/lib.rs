//! medquiz-content: content store backends and configuration.
//!
//! Implements the `ContentSource` trait over HTTP and over a local directory,
//! both serving the same per-partition document layout.

pub mod config;
pub mod directory;
pub mod document;
pub mod error;
pub mod http;

pub use config::{create_source, load_config, ContentConfig, MedquizConfig};
pub use error::ContentError;
