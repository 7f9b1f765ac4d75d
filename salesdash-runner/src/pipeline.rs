//! Pipeline runner: wires ingestion, cleaning, aggregation and correlation.
//!
//! Each stage writes its console report to the pipeline's output sink
//! (stdout unless a test swaps it) and logs progress through `tracing`.
//! Charts are left to the caller: they sit between `aggregate` and the
//! correlation printout.

use std::io::{self, Stdout, Write};

use thiserror::Error;

use salesdash_core::data::{write_cleaned_csv, SalesIngestor};
use salesdash_core::{
    Aggregator, CleanedTable, Cleaner, CorrelationMatrix, DataError, PricedTable, SalesSummary,
    SalesTable,
};

use crate::config::{ConfigError, PipelineConfig};
use crate::report;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Everything the charts and the final correlation printout need.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub priced: PricedTable,
    pub summary: SalesSummary,
    pub correlation: CorrelationMatrix,
}

pub struct Pipeline<W: Write = Stdout> {
    config: PipelineConfig,
    out: W,
}

impl Pipeline<Stdout> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl<W: Write> Pipeline<W> {
    pub fn with_output(config: PipelineConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read the input CSV and print its head, shape and numeric summary.
    pub fn load(&mut self) -> Result<SalesTable, RunError> {
        let input = &self.config.paths.input;
        tracing::info!(path = %input.display(), "loading sales data");

        let table = SalesIngestor::new().ingest_csv(input)?;
        tracing::info!(
            rows = table.height(),
            columns = table.width(),
            coerced_dates = table.coerced_dates(),
            "loaded sales data"
        );

        let info = report::format_basic_info(&table, self.config.report.head_rows)?;
        writeln!(self.out, "{info}")?;
        Ok(table)
    }

    /// Print cleaning diagnostics, normalize `product`, persist the cleaned copy.
    pub fn clean(&mut self, table: SalesTable) -> Result<CleanedTable, RunError> {
        tracing::info!("cleaning sales data");
        let (cleaned, cleaning) = Cleaner::clean(table)?;
        writeln!(self.out, "{}", report::format_cleaning_report(&cleaning))?;

        let output = &self.config.paths.cleaned_output;
        write_cleaned_csv(&cleaned, output)?;
        tracing::info!(
            path = %output.display(),
            rows = cleaned.table().height(),
            "saved cleaned data"
        );
        Ok(cleaned)
    }

    /// Derive `total_sales` and print the three grouped aggregates.
    pub fn aggregate(
        &mut self,
        cleaned: &CleanedTable,
    ) -> Result<(PricedTable, SalesSummary), RunError> {
        tracing::info!("aggregating sales");
        let priced = Aggregator::derive_totals(cleaned)?;
        let summary = Aggregator::summarize(&priced);

        let by_product = summary.sales_by_product.iter().map(|(k, v)| (k, *v));
        let text = report::format_series("Total sales by product:", by_product);
        writeln!(self.out, "{text}")?;

        let quantity = summary.quantity_by_product.iter().map(|(k, v)| (k, *v));
        let text = report::format_series("Total quantity sold by product:", quantity);
        writeln!(self.out, "{text}")?;

        let by_date = summary.sales_by_date.iter().map(|(k, v)| (k, *v));
        let text = report::format_series("Total sales by date:", by_date);
        writeln!(self.out, "{text}")?;

        tracing::info!(
            products = summary.sales_by_product.len(),
            dates = summary.sales_by_date.len(),
            "aggregated sales"
        );
        Ok((priced, summary))
    }

    /// Price/quantity correlation. Printing is a separate step so charts can
    /// come first.
    pub fn correlate(&self, priced: &PricedTable) -> CorrelationMatrix {
        let correlation = Aggregator::correlation(priced);
        tracing::info!(coefficient = correlation.coefficient(), "computed correlation");
        correlation
    }

    pub fn print_correlation(&mut self, correlation: &CorrelationMatrix) -> Result<(), RunError> {
        writeln!(self.out, "Correlation matrix:")?;
        writeln!(self.out, "{}", report::format_correlation(correlation))?;
        Ok(())
    }

    /// load → clean → aggregate → correlate. The correlation is returned,
    /// not printed.
    pub fn run(&mut self) -> Result<PipelineOutput, RunError> {
        let table = self.load()?;
        let cleaned = self.clean(table)?;
        let (priced, summary) = self.aggregate(&cleaned)?;
        let correlation = self.correlate(&priced);
        Ok(PipelineOutput {
            priced,
            summary,
            correlation,
        })
    }
}

/// Validate the config and run every stage, reporting to stdout.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput, RunError> {
    config.validate()?;
    Pipeline::new(config.clone()).run()
}
