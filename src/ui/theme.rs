//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Heart-rate value and chart line.
    pub heart: Color,
    /// Awake status.
    pub awake: Color,
    /// Asleep status.
    pub asleep: Color,
    /// Step count.
    pub steps: Color,
    /// Failure notices.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles and headings.
    pub header: Style,
    /// Style for large metric values.
    pub value: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            heart: Color::LightRed,
            awake: Color::Yellow,
            asleep: Color::LightBlue,
            steps: Color::Green,
            error: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            value: Style::default().add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            heart: Color::Red,
            awake: Color::Rgb(176, 120, 0),
            asleep: Color::Blue,
            steps: Color::Rgb(0, 128, 0),
            error: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            value: Style::default().add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the awake/asleep label.
    pub fn sleep_style(&self, is_awake: bool) -> Style {
        if is_awake {
            Style::default().fg(self.awake).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.asleep).add_modifier(Modifier::BOLD)
        }
    }
}
