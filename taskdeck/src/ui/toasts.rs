//! Toast overlay: placement, rendering, and mouse hit areas.
//!
//! Placement is a pure function of the viewport and the notification
//! center so the app can hit-test mouse events against the same rectangles
//! that were drawn.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use super::theme;
use crate::app::App;
use crate::notifications::{NotificationCenter, Position, ToastId};

/// Toast box width including borders.
pub const TOAST_WIDTH: u16 = 42;

/// Toast box height: border, message, progress gauge, border.
pub const TOAST_HEIGHT: u16 = 4;

/// Rows kept free at the top (header) and bottom (status bar).
const TOP_MARGIN: u16 = 1;
const BOTTOM_MARGIN: u16 = 1;

/// Screen rectangles of the visible toasts, newest first within each corner.
///
/// Toasts that do not fit vertically are left out.
#[must_use]
pub fn layout(area: Rect, center: &NotificationCenter) -> Vec<(ToastId, Rect)> {
    let width = TOAST_WIDTH.min(area.width);
    if width == 0 {
        return Vec::new();
    }
    let x = area.x + area.width - width;
    let top = area.y + TOP_MARGIN;
    let bottom = (area.y + area.height).saturating_sub(BOTTOM_MARGIN);
    let capacity = usize::from(bottom.saturating_sub(top) / TOAST_HEIGHT);

    // Both corners share the column height; the bottom stack is served first.
    let bottom_toasts: Vec<ToastId> = center
        .at(Position::BottomRight)
        .take(capacity)
        .map(|t| t.id)
        .collect();
    let top_capacity = capacity - bottom_toasts.len();

    let mut placed = Vec::new();

    for (i, toast) in center.at(Position::TopRight).take(top_capacity).enumerate() {
        let offset = u16::try_from(i).unwrap_or(u16::MAX).saturating_mul(TOAST_HEIGHT);
        placed.push((toast.id, Rect::new(x, top + offset, width, TOAST_HEIGHT)));
    }

    // Bottom-right stack is anchored to the bottom edge, newest on top.
    let stack = u16::try_from(bottom_toasts.len())
        .unwrap_or(u16::MAX)
        .saturating_mul(TOAST_HEIGHT);
    let start = bottom.saturating_sub(stack).max(top);
    for (i, id) in bottom_toasts.into_iter().enumerate() {
        let offset = u16::try_from(i).unwrap_or(u16::MAX).saturating_mul(TOAST_HEIGHT);
        placed.push((id, Rect::new(x, start + offset, width, TOAST_HEIGHT)));
    }

    placed
}

/// Draw every visible toast over the rest of the UI.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette = theme::palette(app.dark_mode);
    let now = app.now();
    let hovered = app.notifications.hovered();

    for (id, rect) in layout(area, &app.notifications) {
        let Some(toast) = app.notifications.visible().find(|t| t.id == id) else {
            continue;
        };
        let color = theme::severity_color(toast.notice.severity);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(theme::status_bar_bg(palette));
        if hovered == Some(id) || toast.is_paused() {
            block = block.title(Span::styled(" paused ", theme::dimmed(palette)));
        }
        let inner = block.inner(rect);

        frame.render_widget(Clear, rect);
        frame.render_widget(block, rect);

        let message = Paragraph::new(Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(toast.notice.message.as_str(), theme::normal(palette)),
        ]));
        frame.render_widget(message, Rect { height: 1, ..inner });

        if inner.height > 1 {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color))
                .ratio(toast.progress_at(now))
                .label("");
            frame.render_widget(
                gauge,
                Rect {
                    y: inner.y + 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }
}
