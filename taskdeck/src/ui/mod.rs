//! Terminal UI rendering.

pub mod form;
pub mod header;
pub mod stats;
pub mod status_bar;
pub mod task_list;
pub mod theme;
pub mod toasts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = theme::palette(app.dark_mode);
    frame.render_widget(Block::default().style(theme::base(palette)), frame.area());

    let banner_height = u16::from(app.is_idle());
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(banner_height), // Idle banner
            Constraint::Length(4),             // Stats cards
            Constraint::Min(5),                // Form + list
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    header::render(frame, main_chunks[0], app);
    if app.is_idle() {
        header::render_idle_banner(frame, main_chunks[1]);
    }
    stats::render(frame, main_chunks[2], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Form
            Constraint::Percentage(65), // Tasks
        ])
        .split(main_chunks[3]);

    form::render(frame, content_chunks[0], app);
    task_list::render(frame, content_chunks[1], app);
    status_bar::render(frame, main_chunks[4], app);

    // Toasts float above everything else.
    toasts::render(frame, frame.area(), app);
}
