//! gujlish-export - Convert the conversational dataset to CSV
//!
//! **Usage:**
//! ```bash
//! gujlish-export [--input <json>] [--output <csv>] [--preview <rows>] [--config <toml>]
//! ```
//!
//! Input and output fall back to `GUJLISH_DATASET` / the config file /
//! compiled defaults when not given on the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gujlish_common::config::TomlConfig;
use gujlish_export::{export_dataset, format_preview, read_preview, ExportOutcome};
use tracing::{error, info, warn};

/// Command-line arguments for gujlish-export
#[derive(Parser, Debug)]
#[command(name = "gujlish-export")]
#[command(about = "Flatten the Gujlish conversational dataset into a row-per-turn CSV")]
#[command(version)]
struct Args {
    /// Input JSON dataset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, env = "GUJLISH_EXPORT_OUTPUT")]
    output: Option<PathBuf>,

    /// Rows to print back after writing (0 disables)
    #[arg(long, value_name = "ROWS")]
    preview: Option<usize>,

    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, source) = TomlConfig::discover(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting gujlish-export v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", source);

    let input = config.resolve_dataset(args.input.as_deref());
    let output = args.output.unwrap_or_else(|| config.export.output.clone());
    let preview_rows = args.preview.unwrap_or(config.export.preview_rows);

    match export_dataset(&input, &output) {
        Ok(ExportOutcome::Written { path, rows }) => {
            println!(
                "Successfully converted '{}' to '{}' ({} rows).",
                input.display(),
                path.display(),
                rows
            );

            if preview_rows > 0 {
                match read_preview(&path, preview_rows) {
                    Ok(preview) => {
                        println!("\n--- First {} rows of '{}' ---", preview.len(), path.display());
                        print!("{}", format_preview(&preview));
                    }
                    Err(e) => warn!("Could not read '{}' to display preview: {}", path.display(), e),
                }
            }
            Ok(())
        }
        Ok(ExportOutcome::NoData) => {
            println!("No conversation data found in the JSON file.");
            Ok(())
        }
        Err(e) => {
            error!("Export failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
