//! Task list rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use taskdeck_model::Task;

use super::theme::{self, Palette};
use crate::app::{App, Focus};

/// Render the task list, or the empty state when there are no tasks.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette = theme::palette(app.dark_mode);
    let is_focused = app.focus == Focus::List;

    let block = Block::default()
        .title(Span::styled(
            format!(" Tasks ({}) ", app.tasks().len()),
            theme::panel_title(palette.accent),
        ))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted(palette)
        } else {
            theme::normal(palette)
        });

    if app.tasks().is_empty() {
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled("No tasks yet", theme::bold(palette))),
            Line::from(Span::styled(
                "Add your first task to get started!",
                theme::dimmed(palette),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.tasks().iter().map(|t| task_item(t, palette)).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if is_focused {
            theme::selected(palette)
        } else {
            theme::normal(palette)
        })
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_item(task: &Task, palette: Palette) -> ListItem<'static> {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };
    let title_style = if task.completed {
        theme::completed(palette)
    } else {
        theme::normal(palette)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(checkbox, title_style),
        Span::raw(" "),
        Span::styled(task.title.clone(), title_style),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", task.priority.as_str().to_uppercase()),
            theme::priority_badge(task.priority),
        ),
    ])];
    if task.has_description() {
        lines.push(Line::from(Span::styled(
            format!("    {}", task.description),
            theme::dimmed(palette),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "    Created {}",
            task.created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ),
        theme::dimmed(palette),
    )));

    ListItem::new(lines)
}
