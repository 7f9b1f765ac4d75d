//! Test helpers for inspecting rendered buffers and building summaries

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use salesdash_core::{QuantityPivot, SalesSummary};

/// Every cell symbol, row by row, rows separated by newlines.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut content = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            content.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        content.push('\n');
    }
    content
}

/// Number of cells showing `symbol` in foreground `color`.
pub fn cells_with(buf: &Buffer, symbol: &str, color: Color) -> usize {
    let area = buf.area;
    let mut count = 0;
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = buf.cell((x, y)).unwrap();
            if cell.symbol() == symbol && cell.fg == color {
                count += 1;
            }
        }
    }
    count
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

/// Two products over three days.
pub fn create_test_summary() -> SalesSummary {
    let quantity_by_product =
        BTreeMap::from([("gadget".to_string(), 9.0), ("widget".to_string(), 6.0)]);
    let quantity_by_date = BTreeMap::from([(day(1), 5.0), (day(2), 4.0), (day(3), 6.0)]);
    let pivot = QuantityPivot {
        dates: vec![day(1), day(2), day(3)],
        products: vec!["gadget".to_string(), "widget".to_string()],
        cells: vec![
            vec![Some(2.0), Some(3.0)],
            vec![Some(4.0), None],
            vec![Some(3.0), Some(3.0)],
        ],
    };
    SalesSummary {
        sales_by_product: BTreeMap::from([
            ("gadget".to_string(), 22.5),
            ("widget".to_string(), 60.0),
        ]),
        quantity_by_product,
        sales_by_date: BTreeMap::from([(day(1), 30.0), (day(2), 10.0), (day(3), 42.5)]),
        quantity_by_date,
        pivot,
        grand_total_sales: 82.5,
        grand_total_quantity: 15.0,
    }
}
