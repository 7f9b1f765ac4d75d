use polars::prelude::*;
use std::path::Path;

use crate::data::dates::{parse_date, to_epoch_days};
use crate::data::table::SalesTable;
use crate::schema::{is_numeric, SalesSchema, DATE, NUMERIC_COLUMNS, PRODUCT};

/// How many rows polars samples when inferring column types.
const INFER_SCHEMA_LENGTH: usize = 10_000;

/// Data ingestor for sales CSV files
#[derive(Debug, Default)]
pub struct SalesIngestor;

impl SalesIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Ingest a header-first CSV file into a typed `SalesTable`.
    ///
    /// Missing columns and text in `quantity`/`price` are errors. Dates that
    /// do not parse become missing values and are counted on the table.
    pub fn ingest_csv(&self, path: &Path) -> Result<SalesTable, DataError> {
        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
            .finish()
            .and_then(|lf| lf.collect())
            .map_err(|e| DataError::IngestFailed(format!("{}: {e}", path.display())))?;

        tracing::debug!(
            path = %path.display(),
            rows = raw.height(),
            columns = raw.width(),
            "read csv"
        );

        self.ingest_frame(raw)
    }

    /// Type a raw frame: `Date` dates, text products. Numeric columns keep
    /// their loaded dtype; an all-missing column read as text becomes `Float64`.
    pub fn ingest_frame(&self, mut raw: DataFrame) -> Result<SalesTable, DataError> {
        SalesSchema::validate_raw(&raw)?;

        let (dates, coerced) = coerce_dates(&raw)?;
        if coerced > 0 {
            tracing::warn!(coerced, "unparseable dates stored as missing");
        }
        replace_column(&mut raw, dates)?;

        let product = cast_column(&raw, PRODUCT, &DataType::String)?;
        replace_column(&mut raw, product)?;

        for name in NUMERIC_COLUMNS {
            let loaded = raw
                .column(name)
                .map(|c| c.dtype().clone())
                .map_err(|e| DataError::IngestFailed(format!("{name}: {e}")))?;
            if !is_numeric(&loaded) {
                let numeric = cast_column(&raw, name, &DataType::Float64)?;
                replace_column(&mut raw, numeric)?;
            }
        }

        SalesTable::from_frame(raw, coerced)
    }
}

/// Convenience wrapper around `SalesIngestor::default().ingest_csv`.
pub fn load_csv(path: &Path) -> Result<SalesTable, DataError> {
    SalesIngestor::default().ingest_csv(path)
}

fn cast_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column, DataError> {
    df.column(name)
        .and_then(|c| c.cast(dtype))
        .map_err(|e| DataError::IngestFailed(format!("cast {name} to {dtype}: {e}")))
}

fn replace_column(df: &mut DataFrame, column: Column) -> Result<(), DataError> {
    let name = column.name().to_string();
    df.with_column(column)
        .map_err(|e| DataError::IngestFailed(format!("replace {name}: {e}")))?;
    Ok(())
}

/// Parse the `date` column leniently. Returns the `Date` column and the
/// number of non-empty cells that failed to parse.
fn coerce_dates(df: &DataFrame) -> Result<(Column, usize), DataError> {
    let text = cast_column(df, DATE, &DataType::String)?;
    let ca = text
        .str()
        .map_err(|e| DataError::IngestFailed(format!("date column: {e}")))?;

    let mut coerced = 0usize;
    let days: Vec<Option<i32>> = ca
        .into_iter()
        .map(|cell| {
            let raw = cell?;
            let parsed = parse_date(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                coerced += 1;
            }
            parsed.map(to_epoch_days)
        })
        .collect();

    let column = Column::new(DATE.into(), days)
        .cast(&DataType::Date)
        .map_err(|e| DataError::IngestFailed(format!("date cast: {e}")))?;

    Ok((column, coerced))
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Ingest failed: {0}")]
    IngestFailed(String),

    #[error("Schema: {0}")]
    Schema(#[from] crate::schema::SchemaError),

    #[error("Column read failed: {0}")]
    ColumnRead(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaError;

    #[test]
    fn test_ingest_frame_types_columns() {
        let raw = df!(
            "date" => &["2024-01-01", "garbage"],
            "product" => &["Widget ", "gadget"],
            "quantity" => &[3i64, 2],
            "price" => &[10.0, 5.5],
        )
        .unwrap();

        let table = SalesIngestor::new().ingest_frame(raw).unwrap();
        assert_eq!(table.coerced_dates(), 1);
        assert_eq!(table.missing_dates(), 1);

        let records = table.records().unwrap();
        assert_eq!(records[0].quantity, Some(3.0));
        assert_eq!(records[0].product.as_deref(), Some("Widget "));
        assert!(records[1].date.is_none());
    }

    #[test]
    fn test_ingest_frame_keeps_extra_columns() {
        let raw = df!(
            "store" => &["north"],
            "date" => &["2024-01-01"],
            "product" => &["widget"],
            "quantity" => &[3i64],
            "price" => &[10.0],
        )
        .unwrap();

        let table = SalesIngestor::new().ingest_frame(raw).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["store", "date", "product", "quantity", "price"]
        );
    }

    #[test]
    fn test_ingest_frame_rejects_missing_column() {
        let raw = df!(
            "date" => &["2024-01-01"],
            "quantity" => &[3i64],
            "price" => &[10.0],
        )
        .unwrap();

        let err = SalesIngestor::new().ingest_frame(raw).unwrap_err();
        assert!(matches!(err, DataError::Schema(SchemaError::MissingColumn(_))));
    }

    #[test]
    fn test_numeric_product_codes_become_text() {
        let raw = df!(
            "date" => &["2024-01-01"],
            "product" => &[42i64],
            "quantity" => &[1i64],
            "price" => &[2.0],
        )
        .unwrap();

        let table = SalesIngestor::new().ingest_frame(raw).unwrap();
        let records = table.records().unwrap();
        assert_eq!(records[0].product.as_deref(), Some("42"));
    }

    #[test]
    fn test_integer_numerics_keep_their_dtype() {
        let raw = df!(
            "date" => &["2024-01-01"],
            "product" => &["widget"],
            "quantity" => &[3i64],
            "price" => &[10i64],
        )
        .unwrap();

        let table = SalesIngestor::new().ingest_frame(raw).unwrap();
        assert_eq!(table.frame().column("quantity").unwrap().dtype(), &DataType::Int64);
        assert_eq!(table.frame().column("price").unwrap().dtype(), &DataType::Int64);
        assert_eq!(table.records().unwrap()[0].price, Some(10.0));
    }

    #[test]
    fn test_empty_price_column_becomes_missing_floats() {
        let raw = df!(
            "date" => &["2024-01-01", "2024-01-02"],
            "product" => &["widget", "gadget"],
            "quantity" => &[3i64, 1],
            "price" => &[None::<&str>, None],
        )
        .unwrap();

        let table = SalesIngestor::new().ingest_frame(raw).unwrap();
        assert_eq!(table.frame().column("price").unwrap().dtype(), &DataType::Float64);
        assert_eq!(table.numeric_values("price").unwrap(), vec![None, None]);
    }
}
