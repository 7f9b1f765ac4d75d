//! Aggregation: derived `total_sales`, grouped sums, the date × product
//! quantity pivot, and the price/quantity correlation.
//!
//! Grouping conventions:
//! - rows whose group key is missing are left out of that grouping
//! - missing summands are skipped, so a group of only missing values sums to 0
//! - keys are ordered ascending (dates chronologically, products lexically)

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{CleanedTable, DataError};
use crate::domain::PricedRecord;
use crate::stats::pearson;

/// Cleaned rows with their derived `total_sales`.
#[derive(Debug, Clone, Default)]
pub struct PricedTable {
    rows: Vec<PricedRecord>,
}

impl PricedTable {
    pub fn rows(&self) -> &[PricedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn quantities(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.record.quantity).collect()
    }

    pub fn prices(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.record.price).collect()
    }
}

/// Σ quantity per (date, product). Rows are dates ascending, columns are
/// products ascending. Absent combinations are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantityPivot {
    pub dates: Vec<NaiveDate>,
    pub products: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl QuantityPivot {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Charting view: absent combinations count as zero.
    pub fn value_or_zero(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).unwrap_or(0.0)
    }

    /// Stacked height per date.
    pub fn row_totals(&self) -> Vec<f64> {
        (0..self.dates.len())
            .map(|r| (0..self.products.len()).map(|c| self.value_or_zero(r, c)).sum())
            .collect()
    }

    pub fn grand_total(&self) -> f64 {
        self.row_totals().iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.products.is_empty()
    }
}

/// Every grouped reduction the reports and charts need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub sales_by_product: BTreeMap<String, f64>,
    pub quantity_by_product: BTreeMap<String, f64>,
    pub sales_by_date: BTreeMap<NaiveDate, f64>,
    pub quantity_by_date: BTreeMap<NaiveDate, f64>,
    pub pivot: QuantityPivot,
    pub grand_total_sales: f64,
    pub grand_total_quantity: f64,
}

/// Pearson correlation between `price` and `quantity`, labelled in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: [&'static str; 2],
    pub values: [[f64; 2]; 2],
}

impl CorrelationMatrix {
    pub fn from_coefficient(r: f64) -> Self {
        Self {
            labels: ["price", "quantity"],
            values: [[1.0, r], [r, 1.0]],
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.values[0][1]
    }

    pub fn is_symmetric(&self) -> bool {
        let (a, b) = (self.values[0][1], self.values[1][0]);
        a == b || (a.is_nan() && b.is_nan())
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Derive `total_sales = quantity * price` for every cleaned row.
    pub fn derive_totals(cleaned: &CleanedTable) -> Result<PricedTable, DataError> {
        let rows = cleaned
            .table()
            .records()?
            .into_iter()
            .map(PricedRecord::from_record)
            .collect();
        Ok(PricedTable { rows })
    }

    pub fn summarize(priced: &PricedTable) -> SalesSummary {
        let rows = priced.rows();

        let product_key = |r: &PricedRecord| r.record.product.clone();
        let date_key = |r: &PricedRecord| r.record.date;
        let sales = |r: &PricedRecord| r.total_sales;
        let quantity = |r: &PricedRecord| r.record.quantity;

        let summary = SalesSummary {
            sales_by_product: sum_by(rows, product_key, sales),
            quantity_by_product: sum_by(rows, product_key, quantity),
            sales_by_date: sum_by(rows, date_key, sales),
            quantity_by_date: sum_by(rows, date_key, quantity),
            pivot: pivot_quantity(rows),
            grand_total_sales: rows.iter().filter_map(sales).sum(),
            grand_total_quantity: rows.iter().filter_map(quantity).sum(),
        };

        tracing::debug!(
            products = summary.sales_by_product.len(),
            dates = summary.sales_by_date.len(),
            total_sales = summary.grand_total_sales,
            "summarized sales"
        );
        summary
    }

    pub fn correlation(priced: &PricedTable) -> CorrelationMatrix {
        CorrelationMatrix::from_coefficient(pearson(&priced.prices(), &priced.quantities()))
    }
}

fn sum_by<K, FK, FV>(rows: &[PricedRecord], key: FK, value: FV) -> BTreeMap<K, f64>
where
    K: Ord,
    FK: Fn(&PricedRecord) -> Option<K>,
    FV: Fn(&PricedRecord) -> Option<f64>,
{
    let mut groups = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            *groups.entry(k).or_insert(0.0) += value(row).unwrap_or(0.0);
        }
    }
    groups
}

fn pivot_quantity(rows: &[PricedRecord]) -> QuantityPivot {
    let mut groups: BTreeMap<(NaiveDate, &str), f64> = BTreeMap::new();
    let mut products: BTreeSet<&str> = BTreeSet::new();

    for row in rows {
        let (Some(date), Some(product)) = (row.record.date, row.record.product.as_deref()) else {
            continue;
        };
        products.insert(product);
        *groups.entry((date, product)).or_insert(0.0) += row.record.quantity.unwrap_or(0.0);
    }

    let products: Vec<&str> = products.into_iter().collect();
    let dates: Vec<NaiveDate> = groups
        .keys()
        .map(|(d, _)| *d)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = dates
        .iter()
        .map(|d| {
            products
                .iter()
                .map(|p| groups.get(&(*d, *p)).copied())
                .collect()
        })
        .collect();

    QuantityPivot {
        dates,
        products: products.into_iter().map(str::to_string).collect(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cleaner, SalesTable};
    use crate::domain::SalesRecord;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn priced(records: &[SalesRecord]) -> PricedTable {
        let (cleaned, _) = Cleaner::clean(SalesTable::from_records(records).unwrap()).unwrap();
        Aggregator::derive_totals(&cleaned).unwrap()
    }

    #[test]
    fn widget_example_merges_after_cleaning() {
        let priced = priced(&[
            SalesRecord::new(day(1), "Widget ", 3.0, 10.0),
            SalesRecord::new(day(1), "widget", 2.0, 10.0),
        ]);
        let summary = Aggregator::summarize(&priced);

        assert_eq!(summary.quantity_by_product.len(), 1);
        assert_eq!(summary.quantity_by_product["widget"], 5.0);
        assert_eq!(summary.sales_by_product["widget"], 50.0);
        assert_eq!(summary.sales_by_date[&day(1)], 50.0);
    }

    #[test]
    fn pivot_orders_dates_and_products_and_leaves_gaps() {
        let priced = priced(&[
            SalesRecord::new(day(3), "b", 1.0, 1.0),
            SalesRecord::new(day(1), "a", 2.0, 1.0),
            SalesRecord::new(day(1), "b", 4.0, 1.0),
            SalesRecord::new(day(1), "a", 1.0, 1.0),
        ]);
        let pivot = Aggregator::summarize(&priced).pivot;

        assert_eq!(pivot.dates, vec![day(1), day(3)]);
        assert_eq!(pivot.products, vec!["a", "b"]);
        assert_eq!(pivot.get(0, 0), Some(3.0));
        assert_eq!(pivot.get(0, 1), Some(4.0));
        assert_eq!(pivot.get(1, 0), None);
        assert_eq!(pivot.value_or_zero(1, 0), 0.0);
        assert_eq!(pivot.row_totals(), vec![7.0, 1.0]);
        assert_eq!(pivot.grand_total(), 8.0);
    }

    #[test]
    fn missing_keys_are_left_out_of_groupings() {
        let mut no_date = SalesRecord::new(day(1), "a", 5.0, 2.0);
        no_date.date = None;
        let mut no_product = SalesRecord::new(day(2), "x", 7.0, 1.0);
        no_product.product = None;

        let summary = Aggregator::summarize(&priced(&[
            SalesRecord::new(day(1), "a", 1.0, 2.0),
            no_date,
            no_product,
        ]));

        assert_eq!(summary.quantity_by_product["a"], 6.0);
        assert_eq!(summary.quantity_by_date.len(), 2);
        assert_eq!(summary.quantity_by_date[&day(2)], 7.0);
        assert_eq!(summary.pivot.products, vec!["a"]);
        assert_eq!(summary.pivot.dates, vec![day(1)]);
        assert_eq!(summary.grand_total_quantity, 13.0);
    }

    #[test]
    fn missing_price_is_skipped_in_sales_sums() {
        let mut no_price = SalesRecord::new(day(1), "a", 4.0, 1.0);
        no_price.price = None;
        let summary = Aggregator::summarize(&priced(&[
            SalesRecord::new(day(1), "a", 1.0, 2.0),
            no_price,
        ]));

        assert_eq!(summary.sales_by_product["a"], 2.0);
        assert_eq!(summary.quantity_by_product["a"], 5.0);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let priced = priced(&[
            SalesRecord::new(day(1), "a", 1.0, 10.0),
            SalesRecord::new(day(2), "a", 3.0, 8.0),
            SalesRecord::new(day(3), "b", 2.0, 9.5),
        ]);
        let corr = Aggregator::correlation(&priced);

        assert!(corr.is_symmetric());
        assert_eq!(corr.values[0][0], 1.0);
        assert_eq!(corr.values[1][1], 1.0);
        assert!(corr.coefficient() < 0.0);
    }

    #[test]
    fn constant_price_gives_undefined_coefficient() {
        let priced = priced(&[
            SalesRecord::new(day(1), "a", 1.0, 10.0),
            SalesRecord::new(day(2), "a", 3.0, 10.0),
        ]);
        let corr = Aggregator::correlation(&priced);

        assert!(corr.coefficient().is_nan());
        assert!(corr.is_symmetric());
        assert_eq!(corr.values[0][0], 1.0);
    }
}
