//! # Gujlish Common Library
//!
//! Shared code for the Gujlish dataset tools including:
//! - Dataset model and JSON loading
//! - Statistics core (normalization, classification, language-mix ratios)
//! - Configuration loading and path resolution
//! - Common error types

pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;

pub use dataset::{load_dataset, TopicRecord, TurnRecord};
pub use error::{Error, Result};
pub use metrics::{analyze, Statistics};
