//! Terminal rendering.
//!
//! ```text
//!  ♥ PULSEWATCH │ mock data                 header
//! ╭ Heart Rate ────────────────────────────╮
//! │ 74 bpm                                 │
//! │ ⠀⠀⠀⠀⣀⠤⠒⠉⠉⠒⠤⣀⠀⠀⠀                       │ chart::render
//! ╰────────────────────────────────────────╯
//! ╭ Sleep ─────────────╮╭ Steps ───────────╮ panels
//! ╰────────────────────╯╰──────────────────╯
//!  Updated 14:05 | r:refresh ...            status bar
//! ```

pub mod chart;
pub mod common;
pub mod panels;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 16;

/// Draw the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, app, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(8),    // Heart rate
        Constraint::Length(5), // Sleep + steps
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    panels::render_heartrate(frame, app, chunks[1]);

    let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    panels::render_sleep(frame, app, bottom[0]);
    panels::render_steps(frame, app, bottom[1]);

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

fn render_too_small(frame: &mut Frame, app: &App, area: Rect) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.awake));
    let y = area.y + area.height.saturating_sub(2) / 2;
    let centered = Rect::new(area.x, y, area.width, 2.min(area.height));
    frame.render_widget(paragraph, centered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pulsewatch_types::{DataOrigin, HealthSnapshot, HourlyPoint, SleepInterval};
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::runtime::Runtime;

    use crate::scheduler::RefreshOutcome;
    use crate::settings::Settings;
    use crate::source::MockSource;

    fn app(rt: &Runtime) -> App {
        App::with_theme(
            Arc::new(MockSource::new()),
            rt.handle().clone(),
            &Settings::default(),
            Theme::dark(),
        )
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn snapshot() -> HealthSnapshot {
        HealthSnapshot::builder(DataOrigin::Live)
            .heartrate_current(74)
            .heartrate_history(vec![
                HourlyPoint::new(0, 60),
                HourlyPoint::new(1, 58),
                HourlyPoint::new(2, 73),
            ])
            .sleep(SleepInterval::new(1_718_148_600_000, 1_718_176_500_000, true))
            .steps(8421)
            .captured_at_ms(1_718_204_400_000)
            .build()
    }

    #[test]
    fn test_placeholders_before_first_refresh() {
        let rt = Runtime::new().unwrap();
        let app = app(&rt);

        let screen = draw(&app, 80, 24);
        assert!(screen.contains("PULSEWATCH"));
        assert!(screen.contains("-- bpm"));
        assert!(screen.contains("--:--"));
        assert!(screen.contains("-- steps"));
        assert!(screen.contains("No data"));
        assert!(screen.contains("Loading..."));
    }

    #[test]
    fn test_snapshot_values_rendered() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.apply(RefreshOutcome::Snapshot(snapshot()));

        let screen = draw(&app, 80, 24);
        assert!(screen.contains("74 bpm"));
        assert!(screen.contains("8,421 steps"));
        assert!(screen.contains("Awake"));
        assert!(screen.contains("Updated"));
        assert!(screen.contains("0h"));
        assert!(!screen.contains("No data"));
    }

    #[test]
    fn test_failure_keeps_values_and_reports() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.apply(RefreshOutcome::Snapshot(snapshot()));
        app.apply(RefreshOutcome::Failed("refresh task panicked".to_string()));

        let screen = draw(&app, 80, 24);
        assert!(screen.contains("Fetch failed"));
        assert!(screen.contains("8,421 steps"));
    }

    #[test]
    fn test_help_overlay() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.toggle_help();

        let screen = draw(&app, 80, 24);
        assert!(screen.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_too_small() {
        let rt = Runtime::new().unwrap();
        let app = app(&rt);

        let screen = draw(&app, 30, 10);
        assert!(screen.contains("Terminal too small"));
    }
}
