//! Figures: full-screen arrangements of chart panels.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Widget,
};
use salesdash_core::SalesSummary;

use crate::panels::{DailyQuantityChart, ProductQuantityChart, StackedQuantityChart};
use crate::theme::Theme;
use crate::{DEFAULT_DATE_FORMAT, DEFAULT_Y_MAX, DEFAULT_Y_STEP};

/// Axis settings shared by every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub stacked_y_max: f64,
    pub stacked_y_step: f64,
    pub product_y_max: f64,
    pub product_y_step: f64,
    pub date_format: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            stacked_y_max: DEFAULT_Y_MAX,
            stacked_y_step: DEFAULT_Y_STEP,
            product_y_max: DEFAULT_Y_MAX,
            product_y_step: DEFAULT_Y_STEP,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// What the figures draw from.
#[derive(Debug, Clone, Copy)]
pub struct ChartData<'a> {
    pub summary: &'a SalesSummary,
    pub options: &'a ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    /// Quantity per day, stacked by product.
    StackedDaily,
    /// Product bars on the left, daily line on the right.
    ProductAndDaily,
}

impl Figure {
    /// Display order of a full run.
    pub const ALL: [Figure; 2] = [Figure::StackedDaily, Figure::ProductAndDaily];

    pub fn name(&self) -> &'static str {
        match self {
            Figure::StackedDaily => "Daily quantity by product",
            Figure::ProductAndDaily => "Quantity by product and by day",
        }
    }
}

/// One figure plus a status line, sized to the whole terminal.
pub struct FigureView<'a> {
    figure: Figure,
    data: ChartData<'a>,
    theme: &'a Theme,
    position: (usize, usize),
}

impl<'a> FigureView<'a> {
    pub fn new(figure: Figure, data: ChartData<'a>, theme: &'a Theme) -> Self {
        Self {
            figure,
            data,
            theme,
            position: (1, 1),
        }
    }

    /// 1-based index of this figure among `total`.
    pub fn position(mut self, index: usize, total: usize) -> Self {
        self.position = (index, total);
        self
    }
}

impl<'a> Widget for FigureView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let summary = self.data.summary;
        let options = self.data.options;
        match self.figure {
            Figure::StackedDaily => {
                StackedQuantityChart::new(&summary.pivot, self.theme)
                    .y_range(options.stacked_y_max, options.stacked_y_step)
                    .date_format(&options.date_format)
                    .render(chunks[0], buf);
            }
            Figure::ProductAndDaily => {
                let panels = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[0]);
                ProductQuantityChart::new(&summary.quantity_by_product, self.theme)
                    .y_range(options.product_y_max, options.product_y_step)
                    .render(panels[0], buf);
                DailyQuantityChart::new(&summary.quantity_by_date, self.theme)
                    .date_format(&options.date_format)
                    .render(panels[1], buf);
            }
        }

        let (index, total) = self.position;
        let status = format!(
            " Figure {index}/{total}: {}  |  q, Esc or Enter to continue ",
            self.figure.name()
        );
        buf.set_stringn(
            chunks[1].x,
            chunks[1].y,
            status,
            chunks[1].width as usize,
            Style::default().fg(self.theme.text_secondary),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::daily_line::DAILY_TITLE;
    use crate::panels::product_bars::PRODUCT_TITLE;
    use crate::panels::stacked_bar::STACKED_TITLE;
    use crate::test_helpers::{buffer_text, create_test_summary};

    fn render(figure: Figure) -> String {
        let theme = Theme::default();
        let summary = create_test_summary();
        let options = ChartOptions::default();
        let data = ChartData {
            summary: &summary,
            options: &options,
        };
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        FigureView::new(figure, data, &theme)
            .position(2, 2)
            .render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn stacked_figure_fills_the_screen() {
        let text = render(Figure::StackedDaily);
        assert!(text.contains(STACKED_TITLE));
        assert!(!text.contains(PRODUCT_TITLE));
        assert!(text.contains("Figure 2/2"));
    }

    #[test]
    fn two_panel_figure_shows_both_charts() {
        let text = render(Figure::ProductAndDaily);
        assert!(text.contains(PRODUCT_TITLE));
        assert!(text.contains(DAILY_TITLE));
        assert!(!text.contains(STACKED_TITLE));
    }

    #[test]
    fn status_line_names_the_keys() {
        let text = render(Figure::StackedDaily);
        let status = text.lines().last().unwrap();
        assert!(status.contains("q, Esc or Enter"));
    }

    #[test]
    fn full_run_shows_stacked_first() {
        assert_eq!(Figure::ALL[0], Figure::StackedDaily);
        assert_eq!(Figure::ALL[1], Figure::ProductAndDaily);
    }
}
