//! Chart theme tokens for the SalesDash figures
//!
//! # Color Palette
//! - **Background**: terminal default, so figures read like a plot window
//! - **Product series**: ten-color categorical cycle, one color per product
//! - **Product bars**: sky blue
//! - **Daily line**: coral
//! - **Axes and labels**: light gray on default

use ratatui::style::Color;

/// Categorical cycle for stacked product series.
const PRODUCT_PALETTE: [Color; 10] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
    Color::Rgb(227, 119, 194),
    Color::Rgb(127, 127, 127),
    Color::Rgb(188, 189, 34),
    Color::Rgb(23, 190, 207),
];

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    /// Figure border and title
    pub frame: Color,
    /// Axis lines and tick labels
    pub axis: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    /// Per-product quantity bars
    pub product_bar: Color,
    /// Daily quantity line and markers
    pub daily_line: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::plot_window()
    }
}

impl Theme {
    pub fn plot_window() -> Self {
        Self {
            background: Color::Reset,
            frame: Color::White,
            axis: Color::Rgb(170, 170, 170),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
            // skyblue
            product_bar: Color::Rgb(135, 206, 235),
            // coral
            daily_line: Color::Rgb(255, 127, 80),
        }
    }

    /// Series color for the product at `index` in ascending product order.
    pub fn product_color(&self, index: usize) -> Color {
        PRODUCT_PALETTE[index % PRODUCT_PALETTE.len()]
    }
}
