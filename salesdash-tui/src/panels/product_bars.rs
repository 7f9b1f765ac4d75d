//! Product bars - total quantity sold per product on a fixed y range

use std::collections::BTreeMap;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget},
};

use super::axis;
use crate::theme::Theme;
use crate::{DEFAULT_Y_MAX, DEFAULT_Y_STEP};

pub const PRODUCT_TITLE: &str = "Total Quantity Sold by Product";

/// Bar heights are stored in hundredths so fractional quantities still draw.
const SCALE: f64 = 100.0;
const MAX_BAR_WIDTH: u16 = 12;

pub struct ProductQuantityChart<'a> {
    quantities: &'a BTreeMap<String, f64>,
    theme: &'a Theme,
    y_max: f64,
    y_step: f64,
}

impl<'a> ProductQuantityChart<'a> {
    pub fn new(quantities: &'a BTreeMap<String, f64>, theme: &'a Theme) -> Self {
        Self {
            quantities,
            theme,
            y_max: DEFAULT_Y_MAX,
            y_step: DEFAULT_Y_STEP,
        }
    }

    pub fn y_range(mut self, max: f64, step: f64) -> Self {
        self.y_max = max;
        self.y_step = step;
        self
    }

    fn bars(&self) -> Vec<Bar<'a>> {
        self.quantities
            .iter()
            .map(|(product, quantity)| {
                let clipped = quantity.clamp(0.0, self.y_max);
                Bar::default()
                    .value((clipped * SCALE).round() as u64)
                    .text_value(axis::format_tick(*quantity))
                    .label(Line::from(product.as_str()))
            })
            .collect()
    }
}

impl<'a> Widget for ProductQuantityChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {PRODUCT_TITLE} "))
            .title_bottom(Line::from(" Product ").centered())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.frame))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.quantities.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                "No product sales to chart",
                inner.width as usize,
                Style::default().fg(self.theme.text_secondary),
            );
            return;
        }

        let gutter_w = axis::gutter_width(self.y_max, self.y_step);
        if inner.width <= gutter_w + 2 || inner.height < 3 {
            return;
        }

        // The bar chart keeps its bottom row for product labels.
        let bars_h = inner.height - 1;
        let gutter = Rect::new(inner.x, inner.y, gutter_w, bars_h);
        let chart_area = Rect::new(
            inner.x + gutter_w + 1,
            inner.y,
            inner.width - gutter_w - 1,
            inner.height,
        );
        let plot = Rect::new(chart_area.x, chart_area.y, chart_area.width, bars_h);

        axis::render_y_axis(
            self.y_max,
            self.y_step,
            gutter,
            plot,
            Style::default().fg(self.theme.axis),
            buf,
        );

        let n = self.quantities.len() as u16;
        let bar_width = ((chart_area.width + 1) / n.max(1))
            .saturating_sub(1)
            .clamp(1, MAX_BAR_WIDTH);
        let bars = self.bars();

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .max((self.y_max * SCALE).round() as u64)
            .bar_style(Style::default().fg(self.theme.product_bar))
            .value_style(Style::default().fg(self.theme.background).bg(self.theme.product_bar))
            .label_style(Style::default().fg(self.theme.text_secondary))
            .render(chart_area, buf);
    }
}
