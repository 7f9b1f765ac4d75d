//! SalesDash TUI - terminal charts for aggregated sales
//!
//! Two figures, shown one after another like plot windows:
//! - Stacked bars of quantity per day, one segment per product
//! - Per-product quantity bars beside a daily quantity line

pub mod figure;
pub mod panels;
pub mod terminal;
pub mod theme;

pub use figure::{ChartData, ChartOptions, Figure, FigureView};
pub use terminal::show_figures;
pub use theme::Theme;

/// Fixed ceiling of the bar panels.
pub const DEFAULT_Y_MAX: f64 = 20.0;
pub const DEFAULT_Y_STEP: f64 = 2.0;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[cfg(test)]
mod test_helpers;
