//! Statistics cards.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the four statistics cards side by side.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette = theme::palette(app.dark_mode);
    let stats = app.stats();

    let cards: [(&str, String, Color); 4] = [
        ("Total Tasks", stats.total.to_string(), palette.accent),
        ("Completed", stats.completed.to_string(), theme::SUCCESS),
        ("Pending", stats.pending.to_string(), theme::WARNING),
        ("Completion", format!("{}%", stats.completion_rate), theme::INFO),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::dimmed(palette))
            .style(theme::status_bar_bg(palette));
        let text = vec![
            Line::from(Span::styled(value, theme::panel_title(color))),
            Line::from(Span::styled(label, theme::dimmed(palette))),
        ];
        let card = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(card, *chunk);
    }
}
