//! Header (title, subtitle, idle countdown) and the idle banner.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the header box.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette = theme::palette(app.dark_mode);

    let block = Block::default()
        .title(Span::styled(" Task Manager ", theme::panel_title(palette.accent)))
        .borders(Borders::ALL)
        .border_style(theme::dimmed(palette));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)])
        .split(inner);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "Stay productive and organized",
        theme::dimmed(palette),
    )));
    frame.render_widget(subtitle, chunks[0]);

    let countdown = if app.is_idle() {
        Line::from(Span::styled("● Idle", theme::normal(palette).fg(theme::WARNING)))
    } else {
        Line::from(vec![
            Span::styled("● ", theme::normal(palette).fg(theme::SUCCESS)),
            Span::styled("Idle in: ", theme::dimmed(palette)),
            Span::styled(format!("{}s", app.idle_countdown), theme::bold(palette)),
        ])
    };
    frame.render_widget(
        Paragraph::new(countdown).alignment(Alignment::Right),
        chunks[1],
    );
}

/// Render the one-line idle banner.
pub fn render_idle_banner(frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new("You're currently idle. Press any key to continue!")
        .style(theme::idle_banner())
        .alignment(Alignment::Center);
    frame.render_widget(banner, area);
}
