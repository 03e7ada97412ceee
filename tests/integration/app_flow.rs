//! End-to-end application flows driven through terminal events.
//!
//! The app runs against an in-memory store; time is injected so idle and
//! toast behavior is deterministic. Rendering is checked with ratatui's
//! `TestBackend`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use taskdeck::app::{App, Focus};
use taskdeck::config::ClientConfig;
use taskdeck::notifications::{Position, Severity};
use taskdeck::tasks::{KeyValueStore, MemoryStore, TaskStorage};
use taskdeck::ui;
use taskdeck_model::codec::{self, TASKS_KEY};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_app(backend: &MemoryStore, t0: Instant) -> App {
    let storage = TaskStorage::new(Box::new(backend.clone()) as Box<dyn KeyValueStore>);
    let mut app = App::new(&ClientConfig::default(), storage, t0);
    app.set_viewport(Rect::new(0, 0, 100, 30));
    app
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_event(&key(code), now);
}

fn type_str(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn messages(app: &App) -> Vec<String> {
    app.notifications
        .visible()
        .map(|t| t.notice.message.clone())
        .collect()
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

// ===========================================================================
// Task flows
// ===========================================================================

#[test]
fn buy_milk_call_bank_through_the_keyboard() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    assert_eq!(app.focus, Focus::Form);
    type_str(&mut app, "Buy milk", t0);
    press(&mut app, KeyCode::Enter, t0);
    type_str(&mut app, "Call bank", t0);
    press(&mut app, KeyCode::Enter, t0);

    let titles: Vec<&str> = app.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Call bank", "Buy milk"]);

    // Back to the list; the newest task is selected.
    press(&mut app, KeyCode::Esc, t0);
    press(&mut app, KeyCode::Char(' '), t0);

    let stats = app.stats();
    assert_eq!((stats.total, stats.completed, stats.pending), (2, 1, 1));
    assert_eq!(stats.completion_rate, 50);
    assert!(app.tasks()[0].completed);

    assert_eq!(
        messages(&app),
        [
            "Task completed! Great job!",
            "Task added successfully!",
            "Task added successfully!",
        ]
    );

    // The stored collection matches what is on screen.
    let stored = codec::decode(&backend.raw(TASKS_KEY).unwrap()).unwrap();
    assert_eq!(stored, app.tasks());
}

#[test]
fn empty_title_shows_error_and_changes_nothing() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "   ", t0);
    press(&mut app, KeyCode::Enter, t0);

    assert!(app.tasks().is_empty());
    assert_eq!(backend.raw(TASKS_KEY), None);
    let toast = app.notifications.visible().next().unwrap();
    assert_eq!(toast.notice.message, "Task title is required!");
    assert_eq!(toast.notice.severity, Severity::Error);
}

#[test]
fn delete_and_reopen_notifications() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "Water plants", t0);
    press(&mut app, KeyCode::Enter, t0);
    press(&mut app, KeyCode::Esc, t0);
    press(&mut app, KeyCode::Char('x'), t0);
    assert!(app.notifications.is_empty());

    // Complete, then reopen: only completion raises a toast.
    press(&mut app, KeyCode::Enter, t0);
    press(&mut app, KeyCode::Enter, t0);
    assert_eq!(messages(&app), ["Task completed! Great job!"]);

    press(&mut app, KeyCode::Char('d'), t0);
    assert!(app.tasks().is_empty());
    assert_eq!(messages(&app)[0], "Task deleted");

    // Deleting with nothing selected is silent.
    let before = app.notifications.len();
    press(&mut app, KeyCode::Delete, t0);
    assert_eq!(app.notifications.len(), before);
}

#[test]
fn tasks_survive_a_restart() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    {
        let mut app = make_app(&backend, t0);
        press(&mut app, KeyCode::Char('a'), t0);
        type_str(&mut app, "Persist me", t0);
        press(&mut app, KeyCode::BackTab, t0);
        press(&mut app, KeyCode::Right, t0);
        press(&mut app, KeyCode::Enter, t0);
    }

    let app = make_app(&backend, t0);
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.tasks()[0].title, "Persist me");
    assert_eq!(app.tasks()[0].priority, taskdeck_model::Priority::High);
}

#[test]
fn corrupt_storage_starts_empty() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    backend.put_raw(TASKS_KEY, "definitely not json");
    let app = make_app(&backend, t0);
    assert!(app.tasks().is_empty());
}

// ===========================================================================
// Idle flow
// ===========================================================================

#[test]
fn idle_warning_and_welcome_back() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    app.refresh_countdown(t0 + Duration::from_millis(2_500));
    assert_eq!(app.idle_countdown, 27);

    app.housekeeping(t0 + Duration::from_secs(29));
    assert!(!app.is_idle());

    app.housekeeping(t0 + Duration::from_secs(30));
    assert!(app.is_idle());
    app.housekeeping(t0 + Duration::from_secs(31));
    let idle_toasts: Vec<_> = app.notifications.at(Position::BottomRight).collect();
    assert_eq!(idle_toasts.len(), 1);
    assert_eq!(
        idle_toasts[0].notice.message,
        "You have been idle for 30 seconds!"
    );
    assert_eq!(idle_toasts[0].notice.severity, Severity::Warning);
    assert!(render(&app).contains("You're currently idle"));

    // Any key wakes the user up.
    press(&mut app, KeyCode::Down, t0 + Duration::from_secs(40));
    assert!(!app.is_idle());
    let newest = app.notifications.at(Position::BottomRight).next().unwrap();
    assert_eq!(newest.notice.message, "Welcome back! Keep being productive!");
    assert_eq!(newest.notice.severity, Severity::Info);
    assert!(!render(&app).contains("You're currently idle"));

    // A second key press does not raise another welcome.
    press(&mut app, KeyCode::Up, t0 + Duration::from_secs(41));
    assert_eq!(app.notifications.at(Position::BottomRight).count(), 2);
}

#[test]
fn waking_key_is_not_run_as_a_command() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "Keep me", t0);
    press(&mut app, KeyCode::Enter, t0);
    press(&mut app, KeyCode::Esc, t0);

    app.housekeeping(t0 + Duration::from_secs(40));
    assert!(app.is_idle());
    press(&mut app, KeyCode::Char('d'), t0 + Duration::from_secs(41));
    assert!(!app.is_idle());
    assert_eq!(app.tasks().len(), 1);
    assert!(!app.tasks()[0].completed);

    app.housekeeping(t0 + Duration::from_secs(80));
    assert!(app.is_idle());
    press(&mut app, KeyCode::Char('q'), t0 + Duration::from_secs(81));
    assert!(!app.is_idle());
    assert!(!app.should_quit);

    // Once awake, keys act normally.
    press(&mut app, KeyCode::Char('q'), t0 + Duration::from_secs(82));
    assert!(app.should_quit);
}

#[test]
fn pointer_leaving_over_a_toast_does_not_pin_it() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "Short lived", t0);
    press(&mut app, KeyCode::Enter, t0);

    app.handle_event(&mouse(MouseEventKind::Moved, 99, 2), t0 + Duration::from_secs(1));
    assert!(app.notifications.hovered().is_some());
    app.handle_event(&Event::FocusLost, t0 + Duration::from_secs(1));
    app.handle_event(&Event::FocusGained, t0 + Duration::from_secs(5));
    app.housekeeping(t0 + Duration::from_secs(10));
    assert!(app.notifications.is_empty());
}

#[test]
fn focus_gain_counts_as_activity() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    app.handle_event(&Event::FocusLost, t0 + Duration::from_secs(1));
    app.housekeeping(t0 + Duration::from_secs(30));
    assert!(app.is_idle());
    app.handle_event(&Event::FocusGained, t0 + Duration::from_secs(35));
    assert!(!app.is_idle());
}

// ===========================================================================
// Mouse on toasts
// ===========================================================================

#[test]
fn clicking_a_toast_dismisses_it() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "Click me", t0);
    press(&mut app, KeyCode::Enter, t0);
    assert_eq!(app.notifications.len(), 1);

    // Click outside any toast: nothing happens.
    app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 20), t0);
    assert_eq!(app.notifications.len(), 1);

    // Top-right toast occupies the right edge just below the first row.
    app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 90, 2), t0);
    assert!(app.notifications.is_empty());
}

#[test]
fn hovering_a_toast_keeps_it_visible() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "Hover me", t0);
    press(&mut app, KeyCode::Enter, t0);

    app.handle_event(&mouse(MouseEventKind::Moved, 90, 2), t0 + Duration::from_secs(1));
    assert!(app.notifications.hovered().is_some());
    app.housekeeping(t0 + Duration::from_secs(10));
    assert_eq!(app.notifications.len(), 1);

    app.handle_event(&mouse(MouseEventKind::Moved, 5, 20), t0 + Duration::from_secs(10));
    app.housekeeping(t0 + Duration::from_secs(11));
    assert!(app.notifications.is_empty());
}

// ===========================================================================
// Rendering
// ===========================================================================

#[test]
fn rendered_screen_shows_tasks_and_stats() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);

    press(&mut app, KeyCode::Char('a'), t0);
    type_str(&mut app, "Buy milk", t0);
    press(&mut app, KeyCode::Tab, t0);
    type_str(&mut app, "2 liters", t0);
    press(&mut app, KeyCode::Enter, t0);
    press(&mut app, KeyCode::Esc, t0);
    press(&mut app, KeyCode::Char('x'), t0);

    let text = render(&app);
    assert!(text.contains("Buy milk"));
    assert!(text.contains("2 liters"));
    assert!(text.contains("MEDIUM"));
    assert!(text.contains("Completion"));
    assert!(text.contains("0%"));
    assert!(!text.contains("No tasks yet"));
}

#[test]
fn theme_toggle_flips_dark_mode() {
    let t0 = Instant::now();
    let backend = MemoryStore::new();
    let mut app = make_app(&backend, t0);
    assert!(!app.dark_mode);
    press(&mut app, KeyCode::Char('t'), t0);
    assert!(app.dark_mode);
    assert!(render(&app).contains("Task Manager"));
}
