//! Configuration loading and path resolution
//!
//! Settings come from an optional TOML file. Paths are resolved in priority
//! order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing platform config file is not an error: the tools run on compiled
//! defaults and say so at startup. A config file that exists but cannot be
//! read or parsed is reported as [`Error::Config`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Dataset file used when nothing else names one
pub const DEFAULT_DATASET: &str = "gujlishConversationalDataset.json";

/// Environment variable naming the dataset file
pub const DATASET_ENV: &str = "GUJLISH_DATASET";

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "GUJLISH_CONFIG";

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// Compiled defaults; `searched` is the platform path that was missing
    Defaults { searched: Option<PathBuf> },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults {
                searched: Some(path),
            } => write!(f, "compiled defaults (no file at {})", path.display()),
            ConfigSource::Defaults { searched: None } => {
                f.write_str("compiled defaults (no config directory)")
            }
        }
    }
}

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Input dataset path
    pub dataset: Option<PathBuf>,
    pub export: ExportConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// `[export]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// CSV output path
    pub output: PathBuf,
    /// Rows echoed back after writing (0 disables the preview)
    pub preview_rows: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("corpus.csv"),
            preview_rows: 5,
        }
    }
}

/// `[analysis]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory receiving chart images
    pub output_dir: PathBuf,
    pub chart_format: ChartFormat,
    /// Topics listed in the text report
    pub top_topics_report: usize,
    /// Topics drawn in the topic bar chart
    pub top_topics_chart: usize,
    /// Buckets in the English-ratio histogram
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("analysis_plots"),
            chart_format: ChartFormat::default(),
            top_topics_report: 5,
            top_topics_chart: 10,
            histogram_bins: 20,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Chart image format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// Vector output; text is rendered by the viewer
    #[default]
    Svg,
    /// Raster output
    Png,
}

impl ChartFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ChartFormat::Svg),
            "png" => Ok(ChartFormat::Png),
            other => Err(format!("unknown chart format '{}' (expected svg or png)", other)),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Locate and load the config file, falling back to defaults
    ///
    /// An explicit path (CLI argument or `GUJLISH_CONFIG`) must exist. The
    /// platform config file is optional. Returns where the settings came from
    /// so callers can log it once tracing is up.
    pub fn discover(cli_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let explicit = cli_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let config = Self::load(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                let config = Self::load(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            searched => Ok((Self::default(), ConfigSource::Defaults { searched })),
        }
    }

    /// Input dataset path: CLI > `GUJLISH_DATASET` > TOML > compiled default
    pub fn resolve_dataset(&self, cli_arg: Option<&Path>) -> PathBuf {
        resolve_path(
            cli_arg,
            DATASET_ENV,
            self.dataset.as_deref(),
            Path::new(DEFAULT_DATASET),
        )
    }
}

/// Platform config file location (`<config_dir>/gujlish/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gujlish").join("config.toml"))
}

/// Resolve a path from CLI argument, environment variable, config value, or default
pub fn resolve_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config_value: Option<&Path>,
    default: &Path,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Some(path) = std::env::var_os(env_var_name).filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = config_value {
        return path.to_path_buf();
    }

    // Priority 4: Compiled default
    default.to_path_buf()
}
