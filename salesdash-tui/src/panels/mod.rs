//! Chart panels
//!
//! - StackedQuantityChart: per-day stacked bars by product
//! - ProductQuantityChart: total quantity per product
//! - DailyQuantityChart: total quantity per day as a line

pub mod axis;
pub mod daily_line;
pub mod product_bars;
pub mod stacked_bar;

use std::fmt::Write;

use chrono::NaiveDate;

pub use daily_line::DailyQuantityChart;
pub use product_bars::ProductQuantityChart;
pub use stacked_bar::StackedQuantityChart;

/// Format a tick date, falling back to ISO when `format` is not a valid
/// strftime pattern.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", date.format(format)).is_err() {
        return date.format(crate::DEFAULT_DATE_FORMAT).to_string();
    }
    label
}
