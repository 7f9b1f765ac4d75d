//! SalesDash CLI - clean, summarize and chart a sales CSV.
//!
//! Commands:
//! - `run` (default): load, clean, aggregate, show charts, print correlation
//! - `clean`: load and clean only, writing the cleaned copy

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salesdash_runner::{ChartConfig, Pipeline, PipelineConfig};
use salesdash_tui::{show_figures, ChartData, ChartOptions, Figure};

#[derive(Parser)]
#[command(
    name = "salesdash",
    about = "SalesDash: sales CSV cleaning, aggregation and terminal charts",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: PipelineArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline (the default when no command is given).
    Run(PipelineArgs),
    /// Load and clean the input, then write the cleaned copy.
    Clean(PipelineArgs),
}

#[derive(Args, Clone, Default)]
struct PipelineArgs {
    /// Input CSV. Overrides the config file; defaults to sales_data.csv.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the cleaned CSV. Defaults to cleaned_sales_data.csv.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the chart figures.
    #[arg(long, default_value_t = false)]
    no_charts: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salesdash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => run_cmd(&args),
        Some(Commands::Clean(args)) => clean_cmd(&args),
        None => run_cmd(&cli.args),
    }
}

/// Config file (if any), then flag overrides, then validation.
fn resolve_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(input) = &args.input {
        config.paths.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.paths.cleaned_output = output.clone();
    }
    if args.no_charts {
        config.charts.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

fn chart_options(charts: &ChartConfig) -> ChartOptions {
    ChartOptions {
        stacked_y_max: charts.stacked_y_max,
        stacked_y_step: charts.stacked_y_step,
        product_y_max: charts.product_y_max,
        product_y_step: charts.stacked_y_step,
        date_format: charts.date_format.clone(),
    }
}

fn run_cmd(args: &PipelineArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let charts_enabled = config.charts.enabled;
    let options = chart_options(&config.charts);

    let mut pipeline = Pipeline::new(config);
    let output = pipeline.run()?;

    if charts_enabled {
        let data = ChartData {
            summary: &output.summary,
            options: &options,
        };
        show_figures(&Figure::ALL, &data).context("showing charts")?;
    } else {
        tracing::info!("charts disabled");
    }

    pipeline.print_correlation(&output.correlation)?;
    Ok(())
}

fn clean_cmd(args: &PipelineArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let output_path = config.paths.cleaned_output.clone();

    let mut pipeline = Pipeline::new(config);
    let table = pipeline.load()?;
    let cleaned = pipeline.clean(table)?;

    println!(
        "Cleaned {} rows written to {}",
        cleaned.table().height(),
        output_path.display()
    );
    Ok(())
}
