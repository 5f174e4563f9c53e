use crate::model::ChartSeries;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

/// Parse a `#RRGGBB` string into a terminal color. Falls back to white for
/// anything malformed.
fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::White;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Angular sweep per slice, as (start, end) fractions of the full circle.
/// Null values contribute an empty sweep but keep their legend entry.
fn slice_sweeps(series: &ChartSeries) -> Vec<(f64, f64)> {
    let total: i64 = series.values.iter().flatten().filter(|v| **v > 0).sum();
    let mut sweeps = Vec::with_capacity(series.values.len());
    let mut at = 0.0;
    for value in &series.values {
        let share = match value {
            Some(v) if *v > 0 && total > 0 => *v as f64 / total as f64,
            _ => 0.0,
        };
        sweeps.push((at, at + share));
        at += share;
    }
    sweeps
}

/// Render a pie chart with a legend to its right.
pub fn render_pie(f: &mut Frame, area: Rect, series: &ChartSeries, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let sweeps = slice_sweeps(series);
    let colors: Vec<Color> = series.colors.iter().map(|c| hex_color(c)).collect();

    let canvas = Canvas::default()
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(move |ctx| {
            for ((start, end), color) in sweeps.iter().zip(&colors) {
                if end <= start {
                    continue;
                }
                // Fill the sector with radial lines; a fixed angular step
                // keeps thin slices visible without overdrawing wide ones.
                let step = 0.005;
                let mut t = *start;
                while t <= *end {
                    let angle = t * std::f64::consts::TAU;
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: angle.cos(),
                        y2: angle.sin(),
                        color: *color,
                    });
                    t += step;
                }
            }
        });
    f.render_widget(canvas, halves[0]);

    let mut legend: Vec<Line> = Vec::with_capacity(series.labels.len());
    for ((label, value), color) in series
        .labels
        .iter()
        .zip(&series.values)
        .zip(&series.colors)
    {
        let value_text = match value {
            Some(v) => v.to_string(),
            None => "NaN".to_string(),
        };
        legend.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(hex_color(color))),
            Span::raw(format!("{label}: {value_text}")),
        ]));
    }
    if legend.is_empty() {
        legend.push(Line::from("No data"));
    }
    f.render_widget(Paragraph::new(legend), halves[1]);
}
