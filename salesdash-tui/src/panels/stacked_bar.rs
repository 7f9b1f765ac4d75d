//! Stacked bar chart - quantity sold per day, one stacked segment per product
//!
//! Renders:
//! - One bar per date (ascending), segments in ascending product order
//! - Fixed y range with evenly spaced ticks; taller stacks are clipped
//! - Date tick labels under the bars
//! - "Product" legend in the upper-left corner of the plot

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Widget},
};
use salesdash_core::QuantityPivot;

use super::axis;
use super::format_date;
use crate::theme::Theme;
use crate::{DEFAULT_DATE_FORMAT, DEFAULT_Y_MAX, DEFAULT_Y_STEP};

pub const STACKED_TITLE: &str = "Total Quantity Sold per Day by Product";

pub struct StackedQuantityChart<'a> {
    pivot: &'a QuantityPivot,
    theme: &'a Theme,
    y_max: f64,
    y_step: f64,
    date_format: &'a str,
}

impl<'a> StackedQuantityChart<'a> {
    pub fn new(pivot: &'a QuantityPivot, theme: &'a Theme) -> Self {
        Self {
            pivot,
            theme,
            y_max: DEFAULT_Y_MAX,
            y_step: DEFAULT_Y_STEP,
            date_format: DEFAULT_DATE_FORMAT,
        }
    }

    pub fn y_range(mut self, max: f64, step: f64) -> Self {
        self.y_max = max;
        self.y_step = step;
        self
    }

    pub fn date_format(mut self, format: &'a str) -> Self {
        self.date_format = format;
        self
    }

    /// Product index whose segment covers `level` in the stack for `row`,
    /// or `None` above the top of the stack.
    fn segment_at(&self, row: usize, level: f64) -> Option<usize> {
        let mut base = 0.0;
        for col in 0..self.pivot.products.len() {
            let height = self.pivot.value_or_zero(row, col).max(0.0);
            if level < base + height {
                return Some(col);
            }
            base += height;
        }
        None
    }

    fn render_bars(&self, plot: Rect, buf: &mut Buffer) {
        let n = self.pivot.dates.len() as u16;
        let slot = (plot.width / n.max(1)).max(1);
        let bar = if slot >= 3 { slot - slot / 3 } else { slot };
        let pad = (slot - bar) / 2;

        for (i, _) in self.pivot.dates.iter().enumerate() {
            let left = plot.x + i as u16 * slot + pad;
            if left >= plot.right() {
                break;
            }
            for r in 0..plot.height {
                let level = (r as f64 + 0.5) / plot.height as f64 * self.y_max;
                let Some(col) = self.segment_at(i, level) else {
                    break;
                };
                let y = plot.bottom() - 1 - r;
                let style = Style::default().fg(self.theme.product_color(col));
                for x in left..(left + bar).min(plot.right()) {
                    buf.set_string(x, y, "█", style);
                }
            }
        }
    }

    fn render_x_axis(&self, plot: Rect, axis_row: u16, label_row: u16, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.axis);
        buf.set_string(plot.x.saturating_sub(1), axis_row, "└", style);
        for x in plot.left()..plot.right() {
            buf.set_string(x, axis_row, "─", style);
        }

        let n = self.pivot.dates.len() as u16;
        let slot = (plot.width / n.max(1)).max(1);
        let mut free_from = plot.x;
        for (i, date) in self.pivot.dates.iter().enumerate() {
            let x = plot.x + i as u16 * slot;
            if x >= plot.right() {
                break;
            }
            if x < free_from {
                continue;
            }
            let label = format_date(*date, self.date_format);
            let room = (plot.right() - x) as usize;
            if label.len() > room {
                continue;
            }
            buf.set_string(x, label_row, &label, style);
            free_from = x + label.len() as u16 + 1;
        }
    }

    fn render_legend(&self, plot: Rect, buf: &mut Buffer) {
        if plot.width < 4 || plot.height == 0 {
            return;
        }
        let x = plot.x + 1;
        let width = (plot.right() - x) as usize;
        buf.set_stringn(
            x,
            plot.y,
            "Product",
            width,
            Style::default()
                .fg(self.theme.text_primary)
                .add_modifier(Modifier::BOLD),
        );
        for (i, product) in self.pivot.products.iter().enumerate() {
            let y = plot.y + 1 + i as u16;
            if y >= plot.bottom() {
                break;
            }
            buf.set_stringn(x, y, "■", width, Style::default().fg(self.theme.product_color(i)));
            buf.set_stringn(
                x + 2,
                y,
                product,
                width.saturating_sub(2),
                Style::default().fg(self.theme.text_secondary),
            );
        }
    }
}

impl<'a> Widget for StackedQuantityChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {STACKED_TITLE} "))
            .title_bottom(Line::from(" Date ").centered())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.frame))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.pivot.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                "No dated sales to chart",
                inner.width as usize,
                Style::default().fg(self.theme.text_secondary),
            );
            return;
        }

        let gutter_w = axis::gutter_width(self.y_max, self.y_step);
        if inner.width <= gutter_w + 2 || inner.height < 4 {
            return;
        }

        let plot_h = inner.height - 2;
        let gutter = Rect::new(inner.x, inner.y, gutter_w, plot_h);
        let plot = Rect::new(inner.x + gutter_w + 1, inner.y, inner.width - gutter_w - 1, plot_h);

        axis::render_y_axis(
            self.y_max,
            self.y_step,
            gutter,
            plot,
            Style::default().fg(self.theme.axis),
            buf,
        );
        self.render_bars(plot, buf);
        self.render_x_axis(plot, inner.y + plot_h, inner.y + plot_h + 1, buf);
        self.render_legend(plot, buf);
    }
}
