//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette = theme::palette(app.dark_mode);

    let help_text = match app.focus {
        Focus::List => {
            "a: add | ↑↓/jk: select | Space: toggle | d: delete | t: theme | x: dismiss | q: quit"
        }
        Focus::Form => "Tab: next field | ←→: priority | Enter: add | Esc: back | Ctrl+C: quit",
    };

    let (dot_color, storage_text) = if app.store.hook().is_healthy() {
        (theme::SUCCESS, "Saved")
    } else {
        (theme::ERROR, "Not saved")
    };

    let status_line = Line::from(vec![
        Span::styled(
            concat!("TaskDeck v", env!("CARGO_PKG_VERSION")),
            theme::bold(palette),
        ),
        Span::raw(" | "),
        Span::styled("●", theme::normal(palette).fg(dot_color)),
        Span::raw(format!(" {storage_text}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed(palette)),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg(palette));
    frame.render_widget(paragraph, area);
}
