//! Column contract for the sales table.
//!
//! Required columns: `date`, `product`, `quantity`, `price`. Any further
//! columns are carried through the pipeline untouched.

use polars::prelude::*;

pub const DATE: &str = "date";
pub const PRODUCT: &str = "product";
pub const QUANTITY: &str = "quantity";
pub const PRICE: &str = "price";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE, PRODUCT, QUANTITY, PRICE];

/// Columns that must hold numbers.
pub const NUMERIC_COLUMNS: [&str; 2] = [QUANTITY, PRICE];

/// Expected schema for sales data
pub struct SalesSchema;

impl SalesSchema {
    /// Canonical dtypes of the text and date columns after ingestion.
    /// `quantity` and `price` keep the integer or float type they were read
    /// with, so the cleaned copy writes numbers the way the input did.
    pub fn schema() -> Schema {
        Schema::from_iter(vec![
            Field::new(DATE.into(), DataType::Date),
            Field::new(PRODUCT.into(), DataType::String),
        ])
    }

    /// Validate a freshly read DataFrame: required columns exist and the
    /// numeric columns hold numbers. A column with no values at all is read
    /// as text by polars and is accepted as an all-missing numeric column.
    pub fn validate_raw(df: &DataFrame) -> Result<(), SchemaError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(SchemaError::MissingColumn(name.to_string()));
            }
        }

        for name in NUMERIC_COLUMNS {
            let column = df
                .column(name)
                .map_err(|_| SchemaError::MissingColumn(name.to_string()))?;
            if !is_numeric(column.dtype()) && !is_all_missing(column) {
                return Err(SchemaError::TypeMismatch {
                    column: name.to_string(),
                    expected: DataType::Float64,
                    actual: column.dtype().clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate an ingested DataFrame against the canonical dtypes.
    pub fn validate(df: &DataFrame) -> Result<(), SchemaError> {
        let expected = Self::schema();
        let actual = df.schema();

        for field in expected.iter_fields() {
            let actual_dtype = actual
                .get(field.name())
                .ok_or_else(|| SchemaError::MissingColumn(field.name().to_string()))?;
            if actual_dtype != field.dtype() {
                return Err(SchemaError::TypeMismatch {
                    column: field.name().to_string(),
                    expected: field.dtype().clone(),
                    actual: actual_dtype.clone(),
                });
            }
        }

        for name in NUMERIC_COLUMNS {
            let dtype = actual
                .get(name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))?;
            if !is_numeric(dtype) {
                return Err(SchemaError::TypeMismatch {
                    column: name.to_string(),
                    expected: DataType::Float64,
                    actual: dtype.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Integer and float dtypes.
pub fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

fn is_all_missing(column: &Column) -> bool {
    column.null_count() == column.len()
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Type mismatch in column {column}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}
