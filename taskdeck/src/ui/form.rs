//! Add-task form rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use taskdeck_model::Priority;

use super::theme::{self, Palette};
use crate::app::{App, Focus, FormField, TextInput};

/// Render the form panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette = theme::palette(app.dark_mode);
    let is_focused = app.focus == Focus::Form;
    let active = |field: FormField| is_focused && app.form.field == field;

    let mut lines = vec![
        label("Title", active(FormField::Title), palette),
        input_line(&app.form.title, "What needs to be done?", active(FormField::Title), palette),
        Line::default(),
        label("Description", active(FormField::Description), palette),
        input_line(
            &app.form.description,
            "Optional details",
            active(FormField::Description),
            palette,
        ),
        Line::default(),
        label("Priority", active(FormField::Priority), palette),
        priority_line(app.form.priority, active(FormField::Priority), palette),
        Line::default(),
    ];
    lines.push(Line::from(Span::styled(
        if is_focused {
            "Enter: add task | Esc: back to list"
        } else {
            "Press a to add a task"
        },
        theme::dimmed(palette),
    )));

    let block = Block::default()
        .title(Span::styled(" Add Task ", theme::panel_title(palette.accent)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted(palette)
        } else {
            theme::normal(palette)
        });

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn label(text: &'static str, active: bool, palette: Palette) -> Line<'static> {
    let style = if active {
        theme::highlighted(palette)
    } else {
        theme::bold(palette)
    };
    Line::from(Span::styled(text, style))
}

/// Input text with a block cursor when active, or a dimmed placeholder.
fn input_line(
    input: &TextInput,
    placeholder: &'static str,
    active: bool,
    palette: Palette,
) -> Line<'static> {
    if input.value.is_empty() && !active {
        return Line::from(Span::styled(placeholder, theme::dimmed(palette)));
    }

    let mut display: String = input.value.clone();
    if active {
        let idx = display
            .char_indices()
            .nth(input.cursor)
            .map_or(display.len(), |(i, _)| i);
        display.insert(idx, '█');
    }
    Line::from(Span::styled(display, theme::normal(palette)))
}

/// All priorities with the chosen one shown as a badge.
fn priority_line(chosen: Priority, active: bool, palette: Palette) -> Line<'static> {
    let mut spans = Vec::with_capacity(Priority::ALL.len() * 2 + 1);
    if active {
        spans.push(Span::styled("◀ ", theme::highlighted(palette)));
    }
    for priority in Priority::ALL {
        let style = if priority == chosen {
            theme::priority_badge(priority)
        } else {
            Style::default().fg(theme::priority_color(priority))
        };
        spans.push(Span::styled(format!(" {priority} "), style));
        spans.push(Span::raw(" "));
    }
    if active {
        spans.push(Span::styled("▶", theme::highlighted(palette)));
    }
    Line::from(spans)
}
