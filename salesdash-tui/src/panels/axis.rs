//! Fixed-range y axis shared by the bar panels.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Tick values 0, step, 2·step, … up to and including `max`.
pub fn tick_values(max: f64, step: f64) -> Vec<f64> {
    if !is_positive(max) || !is_positive(step) {
        return vec![0.0];
    }
    let count = (max / step + 1e-9).floor() as usize;
    (0..=count).map(|k| k as f64 * step).collect()
}

/// Whole numbers print without a fraction.
pub fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Row offset from the bottom of a `height`-row plot holding `value`.
/// `0` maps to the bottom row and `max` to the top row.
pub fn value_row(value: f64, max: f64, height: u16) -> u16 {
    if height == 0 || !is_positive(max) {
        return 0;
    }
    let frac = (value / max).clamp(0.0, 1.0);
    ((frac * height as f64).floor() as u16).min(height - 1)
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Width of the tick-label gutter, not counting the axis line.
pub fn gutter_width(max: f64, step: f64) -> u16 {
    tick_values(max, step)
        .iter()
        .map(|v| format_tick(*v).len() as u16)
        .max()
        .unwrap_or(1)
}

/// Draw right-aligned tick labels in `gutter` and a vertical axis line just
/// right of it. `plot` is the area the ticks describe.
pub fn render_y_axis(
    max: f64,
    step: f64,
    gutter: Rect,
    plot: Rect,
    style: Style,
    buf: &mut Buffer,
) {
    if plot.height == 0 || gutter.width == 0 {
        return;
    }
    let axis_x = gutter.right();
    for y in plot.top()..plot.bottom() {
        buf.set_string(axis_x, y, "│", style);
    }

    let mut last_row = None;
    for tick in tick_values(max, step) {
        let row = plot.bottom() - 1 - value_row(tick, max, plot.height);
        if last_row == Some(row) {
            continue;
        }
        last_row = Some(row);
        let label = format_tick(tick);
        let x = gutter.right().saturating_sub(label.len() as u16).max(gutter.x);
        buf.set_string(x, row, &label, style);
        buf.set_string(axis_x, row, "┤", style);
    }
}
