//! Cleaning: diagnostics plus `product` normalization.
//!
//! Cleaning never drops rows and never fills missing values. Duplicates stay
//! in the table; they are only counted.

use polars::prelude::*;

use super::table::SalesTable;
use super::DataError;
use crate::schema::{PRICE, PRODUCT, QUANTITY};
use crate::stats::Describe;

/// A sales table whose `product` column has been normalized.
#[derive(Debug, Clone)]
pub struct CleanedTable(SalesTable);

impl CleanedTable {
    pub fn table(&self) -> &SalesTable {
        &self.0
    }

    pub fn into_table(self) -> SalesTable {
        self.0
    }
}

/// Diagnostics gathered before normalization.
#[derive(Debug, Clone)]
pub struct CleaningReport {
    /// Missing cells per column, in table order.
    pub missing_by_column: Vec<(String, usize)>,
    /// Rows equal to an earlier row across all columns.
    pub duplicate_rows: usize,
    /// Column dtypes, in table order.
    pub dtypes: Vec<(String, String)>,
    /// Missing dates, including those coerced from unparseable text.
    pub missing_dates: usize,
    /// Subset of `missing_dates` that held unparseable text.
    pub coerced_dates: usize,
    pub quantity: Describe,
    pub price: Describe,
}

pub struct Cleaner;

impl Cleaner {
    /// Report diagnostics and normalize `product` (trim + lowercase).
    pub fn clean(table: SalesTable) -> Result<(CleanedTable, CleaningReport), DataError> {
        let report = Self::inspect(&table)?;
        let cleaned = Self::normalize(table)?;
        tracing::info!(
            rows = cleaned.table().height(),
            duplicates = report.duplicate_rows,
            missing_dates = report.missing_dates,
            "cleaned sales table"
        );
        Ok((cleaned, report))
    }

    /// Diagnostics only; the table is not modified.
    pub fn inspect(table: &SalesTable) -> Result<CleaningReport, DataError> {
        Ok(CleaningReport {
            missing_by_column: table.null_counts(),
            duplicate_rows: table.duplicate_count()?,
            dtypes: table.dtypes(),
            missing_dates: table.missing_dates(),
            coerced_dates: table.coerced_dates(),
            quantity: Describe::from_values(&table.numeric_values(QUANTITY)?),
            price: Describe::from_values(&table.numeric_values(PRICE)?),
        })
    }

    /// Trim and lowercase every `product` value. Missing products stay missing.
    pub fn normalize(mut table: SalesTable) -> Result<CleanedTable, DataError> {
        let normalized: Vec<Option<String>> = {
            let products = table
                .frame()
                .column(PRODUCT)
                .and_then(|c| c.str().cloned())
                .map_err(|e| DataError::ColumnRead(format!("product column: {e}")))?;
            products
                .into_iter()
                .map(|cell| cell.map(normalize_product))
                .collect()
        };

        table
            .frame_mut()
            .with_column(Column::new(PRODUCT.into(), normalized))
            .map_err(|e| DataError::ColumnRead(format!("replace product: {e}")))?;

        Ok(CleanedTable(table))
    }
}

pub fn normalize_product(raw: &str) -> String {
    raw.trim().to_lowercase()
}
