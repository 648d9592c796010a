//! Heart-rate line chart.
//!
//! Points are plotted by index, not by hour, so gaps in the hourly series do
//! not stretch the line. The y axis is padded by [`Y_PADDING`] beats on both
//! sides of the observed range.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use pulsewatch_types::HourlyPoint;

use super::Theme;

/// Beats added above the maximum and below the minimum.
pub const Y_PADDING: f64 = 5.0;

/// Axis bounds for a chart of `points`.
///
/// Returns `None` when there are fewer than two points to draw a line through.
pub fn chart_bounds(points: &[HourlyPoint]) -> Option<([f64; 2], [f64; 2])> {
    if points.len() < 2 {
        return None;
    }
    let min = points.iter().map(|p| p.value).min()? as f64 - Y_PADDING;
    let max = points.iter().map(|p| p.value).max()? as f64 + Y_PADDING;
    let max = if max - min < 1.0 { min + 1.0 } else { max };

    let x = [0.0, (points.len() - 1) as f64];
    Some((x, [min, max]))
}

/// Plot coordinates for `points`, x being the position in the series.
pub fn chart_data(points: &[HourlyPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value as f64))
        .collect()
}

/// Render the chart into `area`, or a "No data" notice.
pub fn render(frame: &mut Frame, theme: &Theme, points: &[HourlyPoint], block: Block, area: Rect) {
    let Some((x_bounds, y_bounds)) = chart_bounds(points) else {
        let notice = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(notice, area);
        return;
    };

    let data = chart_data(points);
    let last = &data[data.len() - 1..];

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.heart))
            .data(&data),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme.heart).add_modifier(Modifier::BOLD))
            .data(last),
    ];

    let dim = Style::default().add_modifier(Modifier::DIM);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(x_bounds)
                .labels([Span::styled("0h", dim), Span::styled("now", dim)]),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels([
                    Span::styled(format!("{:.0}", y_bounds[0]), dim),
                    Span::styled(format!("{:.0}", y_bounds[1]), dim),
                ]),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, widgets::Borders, Terminal};

    fn points(values: &[(u8, u32)]) -> Vec<HourlyPoint> {
        values.iter().map(|&(h, v)| HourlyPoint::new(h, v)).collect()
    }

    fn render_to_string(points: &[HourlyPoint]) -> String {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let block = Block::default().borders(Borders::ALL);
                render(frame, &Theme::dark(), points, block, frame.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_bounds_padded() {
        let (x, y) = chart_bounds(&points(&[(0, 60), (1, 72), (5, 90)])).unwrap();
        assert_eq!(x, [0.0, 2.0]);
        assert_eq!(y, [55.0, 95.0]);
    }

    #[test]
    fn test_flat_series_still_has_range() {
        let (_, y) = chart_bounds(&points(&[(3, 70), (4, 70)])).unwrap();
        assert_eq!(y, [65.0, 75.0]);
    }

    #[test]
    fn test_too_few_points() {
        assert!(chart_bounds(&[]).is_none());
        assert!(chart_bounds(&points(&[(9, 70)])).is_none());
    }

    #[test]
    fn test_data_indexed_by_position() {
        let data = chart_data(&points(&[(2, 60), (7, 80)]));
        assert_eq!(data, vec![(0.0, 60.0), (1.0, 80.0)]);
    }

    #[test]
    fn test_render_no_data() {
        let text = render_to_string(&points(&[(9, 70)]));
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_render_axis_labels() {
        let text = render_to_string(&points(&[(0, 60), (1, 72), (2, 80)]));
        assert!(text.contains("0h"));
        assert!(text.contains("now"));
        assert!(!text.contains("No data"));
    }
}
