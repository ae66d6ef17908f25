//! Common error types for the Gujlish dataset tools

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Gujlish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the export and analysis tools
#[derive(Error, Debug)]
pub enum Error {
    /// Input dataset path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input dataset is not valid JSON of the expected shape
    #[error("Could not decode JSON from {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
