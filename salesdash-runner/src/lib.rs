//! SalesDash Runner - pipeline orchestration, configuration, console reports.
//!
//! This crate builds on `salesdash-core` to provide:
//! - TOML pipeline configuration with stock defaults
//! - The staged load → clean → aggregate → correlate runner
//! - Plain-text report formatting

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{ChartConfig, ConfigError, PathsConfig, PipelineConfig, ReportConfig};
pub use pipeline::{run_pipeline, Pipeline, PipelineOutput, RunError};
