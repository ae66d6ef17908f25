//! Error types for gujlish-export

use thiserror::Error;

/// Main error type for the export tool
#[derive(Error, Debug)]
pub enum Error {
    /// Loading the input dataset failed
    #[error(transparent)]
    Dataset(#[from] gujlish_common::Error),

    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O errors
    #[error("Error writing CSV file: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using gujlish-export Error
pub type Result<T> = std::result::Result<T, Error>;
