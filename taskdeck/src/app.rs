//! Application state and event handling.
//!
//! [`App`] owns the task store, the idle monitor and the notification
//! center. Terminal events and timer ticks are fed in with the current
//! [`Instant`]; rendering reads the resulting state.

use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position as CellPosition, Rect};
use taskdeck_model::{Priority, Task, TaskStats};

use crate::config::ClientConfig;
use crate::idle::{IdleHandler, IdleMonitor};
use crate::notifications::{
    DEFAULT_DURATION, LONG_DURATION, Notice, NotificationCenter, Position, ToastId,
};
use crate::tasks::{KeyValueStore, Outcome, TaskCommand, TaskStorage, TaskStore};
use crate::ui::toasts;

/// Task store persisted through a boxed key-value backend.
pub type PersistentStore = TaskStore<TaskStorage<Box<dyn KeyValueStore>>>;

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Task list is focused (default).
    List,
    /// Add-task form is focused.
    Form,
}

/// Field of the add-task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Title input.
    Title,
    /// Description input.
    Description,
    /// Priority selector.
    Priority,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Priority,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
        }
    }
}

/// Single-line text input with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Current text.
    pub value: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl TextInput {
    /// Insert a character at the cursor position.
    pub fn enter_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position. Line breaks become spaces.
    pub fn enter_str(&mut self, text: &str) {
        for c in text.chars() {
            self.enter_char(if c.is_control() { ' ' } else { c });
        }
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    /// Move cursor left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Clear the text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

/// Draft of the task being added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Title input.
    pub title: TextInput,
    /// Description input.
    pub description: TextInput,
    /// Selected priority.
    pub priority: Priority,
    /// Field receiving keys.
    pub field: FormField,
}

impl TaskForm {
    /// Empty form with the default priority and the title focused.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: TextInput::default(),
            description: TextInput::default(),
            priority: Priority::default(),
            field: FormField::Title,
        }
    }

    fn active_input(&mut self) -> Option<&mut TextInput> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Priority => None,
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state.
pub struct App {
    /// Task collection, persisted on every change.
    pub store: PersistentStore,
    /// Idle detection.
    pub idle: IdleMonitor,
    /// Visible toasts.
    pub notifications: NotificationCenter,
    /// Which part of the screen is focused.
    pub focus: Focus,
    /// Add-task draft.
    pub form: TaskForm,
    /// Selected row in the task list.
    pub selected: usize,
    /// Dark theme enabled.
    pub dark_mode: bool,
    /// Seconds until idle, refreshed by the display tick.
    pub idle_countdown: u64,
    /// Terminal area used to place toasts for mouse hit-testing.
    pub viewport: Rect,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Time of the event being handled.
    now: Instant,
}

impl App {
    /// Build the app, loading the stored task collection.
    #[must_use]
    pub fn new(
        config: &ClientConfig,
        storage: TaskStorage<Box<dyn KeyValueStore>>,
        now: Instant,
    ) -> Self {
        let tasks = storage.load();
        let store = TaskStore::open(storage, tasks).with_max_title_len(config.max_task_title_len);
        let idle = IdleMonitor::new(config.idle, now);

        Self {
            store,
            idle_countdown: idle.remaining_secs(now),
            idle,
            notifications: NotificationCenter::new(config.max_visible_toasts),
            focus: Focus::List,
            form: TaskForm::new(),
            selected: 0,
            dark_mode: config.dark_mode,
            viewport: Rect::default(),
            should_quit: false,
            now,
        }
    }

    /// Time of the most recent event or tick.
    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Current tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Statistics of the current tasks.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        self.store.stats()
    }

    /// Task under the list cursor.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.store.tasks().get(self.selected)
    }

    /// Whether the idle banner is shown.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.idle.is_idle()
    }

    /// Handle any terminal event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        self.now = now;
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // The key that ends an idle period only wakes the user.
                if self.record_activity() && !is_quit(*key) {
                    return;
                }
                self.handle_key_event(*key);
            }
            Event::Key(_) => {}
            Event::Mouse(mouse) => {
                self.record_activity();
                self.handle_mouse_event(*mouse);
            }
            Event::Paste(text) => {
                self.record_activity();
                if self.focus == Focus::Form
                    && let Some(input) = self.form.active_input()
                {
                    input.enter_str(text);
                }
            }
            Event::FocusGained => {
                self.notifications.set_window_focused(true, now);
                self.record_activity();
            }
            Event::FocusLost => self.notifications.set_window_focused(false, now),
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, *width, *height);
            }
        }
    }

    /// Handle a key press.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        if is_quit(key) {
            self.should_quit = true;
            return;
        }

        // Focus-specific shortcuts
        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    /// Handle a mouse event: hover pauses a toast, a left click dismisses it.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let target = self.toast_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = target {
                    self.notifications.dismiss(id);
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.notifications.set_hovered(target, self.now);
            }
            _ => {}
        }
    }

    /// Refresh the idle countdown display (1s cadence).
    pub fn refresh_countdown(&mut self, now: Instant) {
        self.now = now;
        self.idle_countdown = self.idle.remaining_secs(now);
    }

    /// Check the idle timeout and expire toasts.
    pub fn housekeeping(&mut self, now: Instant) {
        self.now = now;
        if let Some(transition) = self.idle.poll(now) {
            transition.dispatch(self);
            self.idle_countdown = 0;
        }
        self.notifications.tick(now);
    }

    /// Set the terminal area toasts are laid out in.
    pub const fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') | KeyCode::Tab => self.open_form(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('t') => self.dark_mode = !self.dark_mode,
            KeyCode::Char('x') => {
                self.notifications.dismiss_newest();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab => self.form.field = self.form.field.next(),
            KeyCode::BackTab => self.form.field = self.form.field.prev(),
            _ => match self.form.field {
                FormField::Priority => match key.code {
                    KeyCode::Left | KeyCode::Char('h') => {
                        self.form.priority = self.form.priority.prev();
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        self.form.priority = self.form.priority.next();
                    }
                    _ => {}
                },
                FormField::Title | FormField::Description => {
                    let Some(input) = self.form.active_input() else {
                        return;
                    };
                    match key.code {
                        KeyCode::Char(c) => input.enter_char(c),
                        KeyCode::Backspace => input.delete_char(),
                        KeyCode::Left => input.move_left(),
                        KeyCode::Right => input.move_right(),
                        KeyCode::Home => input.cursor = 0,
                        KeyCode::End => input.move_end(),
                        _ => {}
                    }
                }
            },
        }
    }

    fn open_form(&mut self) {
        self.focus = Focus::Form;
        self.form.field = FormField::Title;
    }

    /// Add the drafted task. The form resets only when the task is accepted.
    fn submit_form(&mut self) {
        let command = TaskCommand::Add {
            title: self.form.title.value.clone(),
            description: self.form.description.value.clone(),
            priority: self.form.priority,
        };
        if self.dispatch(command).is_some() {
            self.form = TaskForm::new();
            self.selected = 0;
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.dispatch(TaskCommand::Toggle(id));
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.dispatch(TaskCommand::Delete(id));
            self.clamp_selection();
        }
    }

    /// Run a command against the store and raise the resulting toasts.
    ///
    /// Returns the outcome when the command was accepted.
    fn dispatch(&mut self, command: TaskCommand) -> Option<Outcome> {
        let result = self.store.dispatch(command, Utc::now());
        if let Some(warning) = self.store.hook_mut().take_warning() {
            self.notify(warning);
        }
        match result {
            Ok(outcome) => {
                if let Some(notice) = outcome.notice() {
                    self.notify(notice);
                }
                Some(outcome)
            }
            Err(err) => {
                tracing::debug!(error = %err, "task command rejected");
                self.notify(err.notice());
                None
            }
        }
    }

    fn notify(&mut self, notice: Notice) -> ToastId {
        self.notifications.push(notice, self.now)
    }

    /// Feed an activity signal to the idle monitor. Returns whether it woke
    /// the user up.
    fn record_activity(&mut self) -> bool {
        let Some(transition) = self.idle.record_activity(self.now) else {
            return false;
        };
        transition.dispatch(self);
        self.idle_countdown = self.idle.remaining_secs(self.now);
        true
    }

    fn toast_at(&self, column: u16, row: u16) -> Option<ToastId> {
        let cell = CellPosition::new(column, row);
        toasts::layout(self.viewport, &self.notifications)
            .into_iter()
            .find(|(_, area)| area.contains(cell))
            .map(|(id, _)| id)
    }

    const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.store.len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }
}

fn is_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl IdleHandler for App {
    fn on_idle(&mut self) {
        let secs = self.idle.config().timeout.as_secs();
        self.notify(
            Notice::warning(format!("You have been idle for {secs} seconds!"), LONG_DURATION)
                .at(Position::BottomRight),
        );
    }

    fn on_active(&mut self, idle_for: Duration) {
        tracing::debug!(idle_secs = idle_for.as_secs(), "welcome back");
        self.notify(
            Notice::info("Welcome back! Keep being productive!", DEFAULT_DURATION)
                .at(Position::BottomRight),
        );
    }
}
