//! gujlish-analyze library - statistics report and charts for the dataset
//!
//! The statistics themselves come from `gujlish_common::metrics`; this crate
//! only presents them: a console summary, an optional JSON export, and four
//! chart images.

pub mod charts;
pub mod error;
pub mod report;

pub use charts::{render_charts, ChartKind, ChartOptions, ChartPaths};
pub use error::{Error, Result};
pub use report::{AnalysisReport, CliFormatter};
