//! Console reporting: pure functions that render pipeline results as text.
//!
//! Nothing here prints; the pipeline decides where the text goes.

use std::fmt::Display;
use std::fmt::Write;

use salesdash_core::schema::{PRICE, QUANTITY};
use salesdash_core::{CleaningReport, CorrelationMatrix, DataError, Describe, SalesTable};

/// Head rows, shape and column info, and a describe table of the numeric columns.
pub fn format_basic_info(table: &SalesTable, head_rows: usize) -> Result<String, DataError> {
    let mut out = String::new();

    let _ = writeln!(out, "=== First {head_rows} rows ===");
    let _ = writeln!(out, "{}", table.head(head_rows));
    let _ = writeln!(out);

    let _ = writeln!(out, "=== Table info ===");
    let _ = writeln!(out, "Rows: {}  Columns: {}", table.height(), table.width());
    let _ = writeln!(out, "{:>3}  {:<16} {:>10}  {}", "#", "Column", "Non-Null", "Dtype");
    let nulls = table.null_counts();
    for (i, (name, dtype)) in table.dtypes().iter().enumerate() {
        let missing = nulls.get(i).map(|(_, n)| *n).unwrap_or(0);
        let non_null = table.height().saturating_sub(missing);
        let _ = writeln!(out, "{i:>3}  {name:<16} {non_null:>10}  {dtype}");
    }
    let _ = writeln!(out);

    let quantity = Describe::from_values(&table.numeric_values(QUANTITY)?);
    let price = Describe::from_values(&table.numeric_values(PRICE)?);
    let _ = writeln!(out, "=== Numeric summary ===");
    out.push_str(&format_describe_table(&[(QUANTITY, &quantity), (PRICE, &price)]));

    Ok(out)
}

/// Cleaning diagnostics in the order they are gathered.
pub fn format_cleaning_report(report: &CleaningReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Missing values per column:");
    for (column, missing) in &report.missing_by_column {
        let _ = writeln!(out, "  {column:<16} {missing}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Duplicate rows: {}", report.duplicate_rows);
    let _ = writeln!(out);

    let _ = writeln!(out, "Data types:");
    for (column, dtype) in &report.dtypes {
        let _ = writeln!(out, "  {column:<16} {dtype}");
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Missing dates after conversion: {} ({} unparseable)",
        report.missing_dates, report.coerced_dates
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Potential outliers in '{QUANTITY}':");
    out.push_str(&format_describe_table(&[(QUANTITY, &report.quantity)]));
    let _ = writeln!(out);

    let _ = writeln!(out, "Potential outliers in '{PRICE}':");
    out.push_str(&format_describe_table(&[(PRICE, &report.price)]));

    out
}

/// A describe grid: one row per statistic, one column per input.
pub fn format_describe_table(columns: &[(&str, &Describe)]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<8}", "");
    for (name, _) in columns {
        let _ = write!(out, " {name:>14}");
    }
    let _ = writeln!(out);

    for row in 0..8 {
        let label = columns
            .first()
            .map(|(_, d)| d.rows()[row].0)
            .unwrap_or_default();
        let _ = write!(out, "{label:<8}");
        for (_, describe) in columns {
            let value = describe.rows()[row].1;
            let _ = write!(out, " {:>14}", format_value(value));
        }
        let _ = writeln!(out);
    }

    out
}

/// A grouped aggregate, one `key  value` line per group.
pub fn format_series<K, I>(title: &str, entries: I) -> String
where
    K: Display,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let mut empty = true;
    for (key, value) in entries {
        empty = false;
        let _ = writeln!(out, "  {:<16} {:>14}", key.to_string(), format_value(value));
    }
    if empty {
        let _ = writeln!(out, "  (no groups)");
    }
    out
}

/// 2×2 correlation grid with row and column labels.
pub fn format_correlation(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<10}", "");
    for label in matrix.labels {
        let _ = write!(out, " {label:>10}");
    }
    let _ = writeln!(out);
    for (i, label) in matrix.labels.iter().enumerate() {
        let _ = write!(out, "{label:<10}");
        for j in 0..2 {
            let _ = write!(out, " {:>10}", format_value(matrix.values[i][j]));
        }
        let _ = writeln!(out);
    }
    out
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salesdash_core::{Cleaner, SalesRecord};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn table() -> SalesTable {
        SalesTable::from_records(&[
            SalesRecord::new(day(1), "Widget ", 3.0, 10.0),
            SalesRecord::new(day(2), "gadget", 1.0, 2.5),
        ])
        .unwrap()
    }

    #[test]
    fn basic_info_lists_every_column() {
        let text = format_basic_info(&table(), 5).unwrap();
        assert!(text.contains("=== First 5 rows ==="));
        assert!(text.contains("Rows: 2  Columns: 4"));
        for column in ["date", "product", "quantity", "price"] {
            assert!(text.contains(column), "missing {column} in:\n{text}");
        }
        assert!(text.contains("=== Numeric summary ==="));
    }

    #[test]
    fn cleaning_report_mentions_duplicates_and_dates() {
        let (_, report) = Cleaner::clean(table()).unwrap();
        let text = format_cleaning_report(&report);
        assert!(text.contains("Duplicate rows: 0"));
        assert!(text.contains("Missing dates after conversion: 0 (0 unparseable)"));
        assert!(text.contains("Potential outliers in 'quantity':"));
        assert!(text.contains("Potential outliers in 'price':"));
    }

    #[test]
    fn describe_table_has_eight_statistics() {
        let d = Describe::from_values(&[Some(1.0), Some(3.0)]);
        let text = format_describe_table(&[("quantity", &d)]);
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains("count"));
        assert!(text.contains("2.000000"));
        assert!(text.contains("75%"));
    }

    #[test]
    fn series_lines_follow_input_order() {
        let text = format_series("Total sales by product", [("a", 1.5), ("b", 20.0)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Total sales by product");
        assert!(lines[1].trim_start().starts_with('a'));
        assert!(lines[1].ends_with("1.500000"));
        assert!(lines[2].ends_with("20.000000"));
    }

    #[test]
    fn empty_series_says_so() {
        let text = format_series::<&str, _>("Nothing", []);
        assert!(text.contains("(no groups)"));
    }

    #[test]
    fn correlation_grid_is_labelled() {
        let text = format_correlation(&CorrelationMatrix::from_coefficient(-0.5));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("price") && lines[0].contains("quantity"));
        assert!(lines[1].starts_with("price"));
        assert!(lines[1].contains("1.000000") && lines[1].contains("-0.500000"));
        assert!(lines[2].starts_with("quantity"));
    }

    #[test]
    fn undefined_correlation_prints_nan() {
        let text = format_correlation(&CorrelationMatrix::from_coefficient(f64::NAN));
        assert!(text.contains("NaN"));
    }
}
