//! The in-memory sales table.
//!
//! `SalesTable` owns the polars `DataFrame` loaded from disk. `date` and
//! `product` carry their canonical dtypes (see `SalesSchema`). Numeric
//! columns keep their loaded integer or float type and are widened to `f64`
//! only in the typed views. Extra input columns ride along unchanged so the
//! cleaned copy keeps the input schema.

use polars::prelude::*;

use super::dates::{from_epoch_days, to_epoch_days};
use super::DataError;
use crate::domain::SalesRecord;
use crate::schema::{SalesSchema, DATE, PRICE, PRODUCT, QUANTITY};

#[derive(Debug, Clone)]
pub struct SalesTable {
    frame: DataFrame,
    coerced_dates: usize,
}

impl SalesTable {
    /// Wrap an already-typed frame. Fails if the canonical dtypes are not in place.
    pub fn from_frame(frame: DataFrame, coerced_dates: usize) -> Result<Self, DataError> {
        SalesSchema::validate(&frame)?;
        Ok(Self {
            frame,
            coerced_dates,
        })
    }

    /// Build a table holding exactly the four required columns.
    pub fn from_records(records: &[SalesRecord]) -> Result<Self, DataError> {
        let dates: Vec<Option<i32>> = records
            .iter()
            .map(|r| r.date.map(to_epoch_days))
            .collect();
        let products: Vec<Option<String>> = records.iter().map(|r| r.product.clone()).collect();
        let quantities: Vec<Option<f64>> = records.iter().map(|r| r.quantity).collect();
        let prices: Vec<Option<f64>> = records.iter().map(|r| r.price).collect();

        let frame = DataFrame::new(vec![
            Column::new(DATE.into(), dates)
                .cast(&DataType::Date)
                .map_err(|e| DataError::ColumnRead(format!("date cast: {e}")))?,
            Column::new(PRODUCT.into(), products),
            Column::new(QUANTITY.into(), quantities),
            Column::new(PRICE.into(), prices),
        ])
        .map_err(|e| DataError::ColumnRead(format!("dataframe creation: {e}")))?;

        Self::from_frame(frame, 0)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    /// Number of non-empty date cells that could not be parsed at load time.
    pub fn coerced_dates(&self) -> usize {
        self.coerced_dates
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// First `n` rows, for console display.
    pub fn head(&self, n: usize) -> DataFrame {
        self.frame.head(Some(n))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// `(column, dtype)` pairs in table order.
    pub fn dtypes(&self) -> Vec<(String, String)> {
        self.frame
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.dtype().to_string()))
            .collect()
    }

    /// `(column, missing cells)` pairs in table order.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.frame
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }

    /// Missing cells in the `date` column, including coerced ones.
    pub fn missing_dates(&self) -> usize {
        self.frame
            .column(DATE)
            .map(|c| c.null_count())
            .unwrap_or(0)
    }

    /// Rows identical to an earlier row across every column.
    pub fn duplicate_count(&self) -> Result<usize, DataError> {
        let unique = self
            .frame
            .unique_stable(None, UniqueKeepStrategy::First, None)
            .map_err(|e| DataError::ColumnRead(format!("duplicate scan: {e}")))?;
        Ok(self.height() - unique.height())
    }

    /// Values of a numeric column as `f64`, missing cells as `None`.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>, DataError> {
        let column = self
            .frame
            .column(name)
            .and_then(|c| c.cast(&DataType::Float64))
            .map_err(|e| DataError::ColumnRead(format!("{name}: {e}")))?;
        let ca = column
            .f64()
            .map_err(|e| DataError::ColumnRead(format!("{name} column type: {e}")))?;
        Ok(ca.into_iter().collect())
    }

    /// Typed view of the required columns, one entry per row.
    pub fn records(&self) -> Result<Vec<SalesRecord>, DataError> {
        let map_err = |e: PolarsError| DataError::ColumnRead(format!("column read: {e}"));

        let dates = self.frame.column(DATE).map_err(map_err)?;
        let products = self.frame.column(PRODUCT).map_err(map_err)?;
        let quantities = self.numeric_values(QUANTITY)?;
        let prices = self.numeric_values(PRICE)?;

        let date_ca = dates
            .date()
            .map_err(|e| DataError::ColumnRead(format!("date column type: {e}")))?;
        let product_ca = products
            .str()
            .map_err(|e| DataError::ColumnRead(format!("product column type: {e}")))?;

        let n = self.height();
        let mut records = Vec::with_capacity(n);
        for i in 0..n {
            records.push(SalesRecord {
                date: date_ca.get(i).and_then(from_epoch_days),
                product: product_ca.get(i).map(str::to_string),
                quantity: quantities[i],
                price: prices[i],
            });
        }

        Ok(records)
    }
}
