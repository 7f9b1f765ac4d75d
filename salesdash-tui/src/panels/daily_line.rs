//! Daily line - total quantity sold per day with point markers
//!
//! Dates map to days since the epoch on the x axis, so gaps between sale
//! days keep their true width. Every sale date gets a tick label unless the
//! labels would not fit. The y axis is padded by one unit each side.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use salesdash_core::data::dates::to_epoch_days;

use super::format_date;
use crate::theme::Theme;
use crate::DEFAULT_DATE_FORMAT;

pub const DAILY_TITLE: &str = "Total Quantity Sold per Day";

pub struct DailyQuantityChart<'a> {
    quantities: &'a BTreeMap<NaiveDate, f64>,
    theme: &'a Theme,
    date_format: &'a str,
}

impl<'a> DailyQuantityChart<'a> {
    pub fn new(quantities: &'a BTreeMap<NaiveDate, f64>, theme: &'a Theme) -> Self {
        Self {
            quantities,
            theme,
            date_format: DEFAULT_DATE_FORMAT,
        }
    }

    pub fn date_format(mut self, format: &'a str) -> Self {
        self.date_format = format;
        self
    }

    fn points(&self) -> Vec<(f64, f64)> {
        self.quantities
            .iter()
            .map(|(date, quantity)| (f64::from(to_epoch_days(*date)), *quantity))
            .collect()
    }
}

/// X-axis labels and the last day the axis covers. `dates` is ascending.
///
/// ratatui spreads labels evenly across the axis, so there is one slot per
/// calendar day from the first sale date on: sale days carry their date and
/// other days stay blank. When a slot is too narrow for a date, slots are
/// spaced `stride` days apart and each one is labelled. The axis always
/// spans at least one day.
pub fn date_labels(
    dates: &[NaiveDate],
    date_format: &str,
    plot_width: u16,
) -> (Vec<String>, NaiveDate) {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return (Vec::new(), NaiveDate::MIN);
    };
    let span = (last - first).num_days().max(1);
    let label_width = dates
        .iter()
        .map(|d| format_date(*d, date_format).chars().count())
        .max()
        .unwrap_or(0) as i64;

    // Labels between the first and last need one spare column each.
    let fits = |slots: i64| slots * (label_width + 1) <= i64::from(plot_width);

    if fits(span + 1) {
        let labels = (0..=span)
            .map(|offset| first + chrono::Duration::days(offset))
            .map(|day| {
                if dates.binary_search(&day).is_ok() {
                    format_date(day, date_format)
                } else {
                    String::new()
                }
            })
            .collect();
        return (labels, first + chrono::Duration::days(span));
    }

    let steps_for = |stride: i64| (span + stride - 1) / stride;
    let mut stride = 2;
    while !fits(steps_for(stride) + 1) && steps_for(stride) > 1 {
        stride += 1;
    }
    let steps = steps_for(stride);
    let labels = (0..=steps)
        .map(|k| format_date(first + chrono::Duration::days(k * stride), date_format))
        .collect();
    (labels, first + chrono::Duration::days(steps * stride))
}

/// `[min - 1, max + 1]` over the plotted values.
pub fn y_bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min.is_finite() && max.is_finite() {
        [min - 1.0, max + 1.0]
    } else {
        [0.0, 1.0]
    }
}

impl<'a> Widget for DailyQuantityChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {DAILY_TITLE} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.frame))
            .style(Style::default().bg(self.theme.background));

        let Some(first) = self.quantities.keys().next().copied() else {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_stringn(
                inner.x,
                inner.y,
                "No dated sales to chart",
                inner.width as usize,
                Style::default().fg(self.theme.text_secondary),
            );
            return;
        };

        let data = self.points();
        let [y_lower, y_upper] = y_bounds(data.iter().map(|&(_, y)| y));
        let y_labels: Vec<String> = [y_lower, (y_lower + y_upper) / 2.0, y_upper]
            .iter()
            .map(|v| format!("{v:.1}"))
            .collect();

        // Borders, the tick-label gutter and the axis line. ratatui widens the
        // gutter to fit the first date label.
        let first_label = format_date(first, self.date_format).chars().count();
        let gutter = y_labels
            .iter()
            .map(String::len)
            .chain(std::iter::once(first_label))
            .max()
            .unwrap_or(0) as u16
            + 1;
        let plot_width = area.width.saturating_sub(2 + gutter);
        let dates: Vec<NaiveDate> = self.quantities.keys().copied().collect();
        let (x_labels, axis_end) = date_labels(&dates, self.date_format, plot_width);

        let x_lower = f64::from(to_epoch_days(first));
        let x_upper = f64::from(to_epoch_days(axis_end));
        let x_labels: Vec<Span> = x_labels.into_iter().map(Span::raw).collect();
        let y_labels: Vec<Span> = y_labels.into_iter().map(Span::raw).collect();

        let line_style = Style::default().fg(self.theme.daily_line);
        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(line_style)
                .data(&data),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(line_style)
                .data(&data),
        ];

        let axis_style = Style::default().fg(self.theme.axis);
        let title_style = Style::default().fg(self.theme.text_secondary);
        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", title_style))
                    .style(axis_style)
                    .bounds([x_lower, x_upper])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Quantity", title_style))
                    .style(axis_style)
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}
