//! Error types for gujlish-analyze

use thiserror::Error;

/// Main error type for the analysis tool
#[derive(Error, Debug)]
pub enum Error {
    /// Loading the input dataset failed
    #[error(transparent)]
    Dataset(#[from] gujlish_common::Error),

    /// Chart drawing or encoding failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Requested chart format is not compiled in
    #[error("Unsupported chart format: {0}")]
    UnsupportedFormat(String),

    /// Statistics JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using gujlish-analyze Error
pub type Result<T> = std::result::Result<T, Error>;
