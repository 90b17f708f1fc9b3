//! Content store error types.

use thiserror::Error;

/// Errors that can occur when fetching a content document.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The document was not a valid JSON array of records.
    #[error("failed to parse {document}: {message}")]
    Parse { document: String, message: String },

    /// A local document could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}
