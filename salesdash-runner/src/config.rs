//! Serializable pipeline configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! reproduces the stock behaviour: read `sales_data.csv`, write
//! `cleaned_sales_data.csv`, clip the stacked chart to [0, 20] with ticks
//! every 2.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    pub report: ReportConfig,
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub cleaned_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("sales_data.csv"),
            cleaned_output: PathBuf::from("cleaned_sales_data.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown by the head-of-table dump.
    pub head_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { head_rows: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub enabled: bool,
    /// Fixed ceiling of the stacked daily chart; taller stacks are clipped.
    pub stacked_y_max: f64,
    pub stacked_y_step: f64,
    /// Fixed ceiling of the per-product bar panel.
    pub product_y_max: f64,
    pub date_format: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stacked_y_max: 20.0,
            stacked_y_step: 2.0,
            product_y_max: 20.0,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.head_rows == 0 {
            return Err(ConfigError::Invalid("report.head_rows must be > 0".into()));
        }
        let charts = &self.charts;
        if !is_positive(charts.stacked_y_max) {
            return Err(ConfigError::Invalid("charts.stacked_y_max must be > 0".into()));
        }
        if !is_positive(charts.stacked_y_step) {
            return Err(ConfigError::Invalid("charts.stacked_y_step must be > 0".into()));
        }
        if !is_positive(charts.product_y_max) {
            return Err(ConfigError::Invalid("charts.product_y_max must be > 0".into()));
        }
        if charts.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("charts.date_format must not be empty".into()));
        }
        if StrftimeItems::new(&charts.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "charts.date_format '{}' is not a valid strftime pattern",
                charts.date_format
            )));
        }
        Ok(())
    }
}

/// False for zero, negatives and NaN.
fn is_positive(value: f64) -> bool {
    value > 0.0
}
