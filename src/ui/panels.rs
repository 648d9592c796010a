//! Metric panels: heart rate, sleep and steps.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::clock::NO_TIME;
use crate::data::format::NO_VALUE;

use super::chart;

fn panel(app: &App, title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Current bpm above the hourly chart.
pub fn render_heartrate(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(app, "Heart Rate");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(inner);

    let bpm = app
        .fields
        .as_ref()
        .map(|f| f.heartrate.as_str())
        .unwrap_or(NO_VALUE);
    let line = Line::from(vec![
        Span::styled(
            format!(" {}", bpm),
            app.theme.value.fg(app.theme.heart),
        ),
        Span::styled(" bpm", Style::default().add_modifier(Modifier::DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), chunks[0]);

    let history = app
        .snapshot
        .as_ref()
        .map(|s| s.heartrate_history())
        .unwrap_or_default();
    chart::render(frame, &app.theme, history, Block::default(), chunks[1]);
}

/// Sleep start and end with the awake/asleep status.
pub fn render_sleep(frame: &mut Frame, app: &App, area: Rect) {
    let (start, end, is_awake) = match app.fields {
        Some(ref f) => (f.sleep_start.as_str(), f.sleep_end.as_str(), f.is_awake),
        None => (NO_TIME, NO_TIME, true),
    };
    let label = if is_awake { "Awake" } else { "Asleep" };

    let dim = Style::default().add_modifier(Modifier::DIM);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Asleep ", dim),
            Span::styled(start.to_string(), app.theme.value),
        ]),
        Line::from(vec![
            Span::styled(" Woke   ", dim),
            Span::styled(end.to_string(), app.theme.value),
        ]),
        Line::from(vec![
            Span::styled(" Now    ", dim),
            Span::styled(label, app.theme.sleep_style(is_awake)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel(app, "Sleep")), area);
}

/// Today's step count.
pub fn render_steps(frame: &mut Frame, app: &App, area: Rect) {
    let steps = app
        .fields
        .as_ref()
        .map(|f| f.steps.as_str())
        .unwrap_or(NO_VALUE);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {}", steps), app.theme.value.fg(app.theme.steps)),
            Span::styled(" steps", Style::default().add_modifier(Modifier::DIM)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel(app, "Steps")), area);
}
