//! gujlish-analyze - Dataset statistics and charts
//!
//! **Usage:**
//! ```bash
//! gujlish-analyze [--input <json>] [--output-dir <dir>] [--format svg|png]
//!                 [--top <n>] [--json <file>] [--no-charts] [--config <toml>]
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use gujlish_analyze::{render_charts, AnalysisReport, ChartOptions, CliFormatter};
use gujlish_common::config::{ChartFormat, TomlConfig};
use gujlish_common::{analyze, load_dataset};
use tracing::{error, info};

/// Command-line arguments for gujlish-analyze
#[derive(Parser, Debug)]
#[command(name = "gujlish-analyze")]
#[command(about = "Descriptive statistics and charts for the Gujlish conversational dataset")]
#[command(version)]
struct Args {
    /// Input JSON dataset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory receiving chart images
    #[arg(short, long, env = "GUJLISH_PLOTS_DIR")]
    output_dir: Option<PathBuf>,

    /// Chart image format (svg or png)
    #[arg(short, long)]
    format: Option<ChartFormat>,

    /// Topics listed in the console report
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Also write the statistics to this JSON file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

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
        "Starting gujlish-analyze v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", source);

    if let Err(e) = run(&args, &config) {
        error!("Analysis failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args, config: &TomlConfig) -> Result<()> {
    let start_time = Instant::now();
    let input = config.resolve_dataset(args.input.as_deref());

    let topics = load_dataset(&input)?;
    let stats = analyze(&topics);

    let top_n = args.top.unwrap_or(config.analysis.top_topics_report);
    print!("{}", CliFormatter::format_summary(&stats, top_n));

    if let Some(json_path) = &args.json {
        AnalysisReport::new(&input, stats.clone())
            .export_json(json_path)
            .with_context(|| format!("Failed to write statistics to {}", json_path.display()))?;
        println!("\nStatistics written to '{}'.", json_path.display());
    }

    if !args.no_charts {
        let options = ChartOptions {
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.analysis.output_dir.clone()),
            format: args.format.unwrap_or(config.analysis.chart_format),
            top_topics: config.analysis.top_topics_chart,
            histogram_bins: config.analysis.histogram_bins,
        };
        render_charts(&stats, &options)?;
        println!(
            "\nVisualizations saved in '{}' directory.",
            options.output_dir.display()
        );
    }

    info!(
        "Analysis complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
