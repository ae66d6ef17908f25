//! gujlish-export library - flattens the conversational dataset into CSV
//!
//! One row per speaker turn, numbered across the whole document, with the
//! topic name repeated on every row.

pub mod error;
pub mod rows;
pub mod writer;

pub use error::{Error, Result};
pub use rows::{flatten, TurnRow, CSV_HEADER};
pub use writer::{export_dataset, format_preview, read_preview, write_csv, ExportOutcome};
