//! Theme and styling for the TUI.
//!
//! Two palettes (light and dark) share the same semantic colors for
//! severities and priorities.

use ratatui::style::{Color, Modifier, Style};
use taskdeck_model::Priority;

use crate::notifications::Severity;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Informational indicator color.
pub const INFO: Color = Color::Cyan;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Base colors of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary foreground.
    pub fg: Color,
    /// Dimmed foreground (metadata, hints).
    pub fg_dim: Color,
    /// Screen background.
    pub bg: Color,
    /// Focused borders and accents.
    pub accent: Color,
    /// Status bar and card background.
    pub surface: Color,
}

/// Light theme (default).
pub const LIGHT: Palette = Palette {
    fg: Color::Rgb(31, 41, 55),
    fg_dim: Color::Rgb(107, 114, 128),
    bg: Color::Rgb(243, 244, 246),
    accent: Color::Rgb(37, 99, 235),
    surface: Color::Rgb(255, 255, 255),
};

/// Dark theme.
pub const DARK: Palette = Palette {
    fg: Color::Rgb(243, 244, 246),
    fg_dim: Color::Rgb(156, 163, 175),
    bg: Color::Rgb(17, 24, 39),
    accent: Color::Rgb(96, 165, 250),
    surface: Color::Rgb(31, 41, 55),
};

/// Palette for the current mode.
#[must_use]
pub const fn palette(dark_mode: bool) -> Palette {
    if dark_mode { DARK } else { LIGHT }
}

/// Screen background style.
#[must_use]
pub fn base(p: Palette) -> Style {
    Style::default().fg(p.fg).bg(p.bg)
}

/// Normal text style.
#[must_use]
pub fn normal(p: Palette) -> Style {
    Style::default().fg(p.fg)
}

/// Dimmed text style (descriptions, dates, hints).
#[must_use]
pub fn dimmed(p: Palette) -> Style {
    Style::default().fg(p.fg_dim)
}

/// Bold text style.
#[must_use]
pub fn bold(p: Palette) -> Style {
    Style::default().fg(p.fg).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted(p: Palette) -> Style {
    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected(p: Palette) -> Style {
    Style::default()
        .fg(p.bg)
        .bg(p.accent)
        .add_modifier(Modifier::BOLD)
}

/// Completed task title.
#[must_use]
pub fn completed(p: Palette) -> Style {
    dimmed(p).add_modifier(Modifier::CROSSED_OUT)
}

/// Style for the status bar background.
#[must_use]
pub fn status_bar_bg(p: Palette) -> Style {
    Style::default().fg(p.fg).bg(p.surface)
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Badge color for a priority.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
    }
}

/// Priority badge style (black on the priority color).
#[must_use]
pub fn priority_badge(priority: Priority) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(priority_color(priority))
        .add_modifier(Modifier::BOLD)
}

/// Accent color for a toast severity.
#[must_use]
pub const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => SUCCESS,
        Severity::Info => INFO,
        Severity::Warning => WARNING,
        Severity::Error => ERROR,
    }
}

/// Idle banner style (bold black on warning yellow).
#[must_use]
pub fn idle_banner() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(WARNING)
        .add_modifier(Modifier::BOLD)
}
