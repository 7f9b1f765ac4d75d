//! Sales record types.
//!
//! A `SalesRecord` is one row of the input table as loaded. `total_sales` is
//! deliberately absent from it: the derived amount only exists on
//! `PricedRecord`, which the aggregator builds from a cleaned table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sales transaction row. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date; `None` when empty or unparseable.
    pub date: Option<NaiveDate>,
    pub product: Option<String>,
    /// Units sold.
    pub quantity: Option<f64>,
    /// Unit price.
    pub price: Option<f64>,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, product: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self {
            date: Some(date),
            product: Some(product.into()),
            quantity: Some(quantity),
            price: Some(price),
        }
    }
}

/// A cleaned record with its derived `total_sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedRecord {
    pub record: SalesRecord,
    /// `quantity * price`; `None` when either operand is missing.
    pub total_sales: Option<f64>,
}

impl PricedRecord {
    pub fn from_record(record: SalesRecord) -> Self {
        let total_sales = match (record.quantity, record.price) {
            (Some(q), Some(p)) => Some(q * p),
            _ => None,
        };
        Self {
            record,
            total_sales,
        }
    }
}
