//! Ephemeral toast notifications.
//!
//! [`NotificationCenter`] is a timed queue with explicit pause/resume state,
//! independent of rendering. Toasts stack newest-first per screen corner and
//! disappear after their duration has elapsed *while running*: hovering a
//! toast pauses it, and losing terminal focus pauses all of them.
//!
//! Time is passed in by the caller so the queue can be driven
//! deterministically from tests.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Lifetime for quick confirmations (task added, completed, deleted).
pub const SHORT_DURATION: Duration = Duration::from_secs(2);

/// Lifetime for errors and the welcome-back message.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

/// Lifetime for the idle warning.
pub const LONG_DURATION: Duration = Duration::from_secs(5);

/// Default number of toasts kept per corner.
pub const DEFAULT_MAX_PER_POSITION: usize = 5;

/// Visual severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation succeeded.
    Success,
    /// Neutral information.
    Info,
    /// Something needs attention.
    Warning,
    /// Operation was rejected.
    Error,
}

/// Screen corner a toast stacks in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    /// Top-right corner (default).
    #[default]
    TopRight,
    /// Bottom-right corner.
    BottomRight,
}

/// A notification request: what to show, where, and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text.
    pub message: String,
    /// Visual severity.
    pub severity: Severity,
    /// Corner to stack in.
    pub position: Position,
    /// Running time before auto-dismissal.
    pub duration: Duration,
}

impl Notice {
    /// Creates a top-right notice.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            position: Position::TopRight,
            duration,
        }
    }

    /// Success notice.
    #[must_use]
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(Severity::Success, message, duration)
    }

    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(Severity::Info, message, duration)
    }

    /// Warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(Severity::Warning, message, duration)
    }

    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(Severity::Error, message, duration)
    }

    /// Moves the notice to another corner.
    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Identifier of a toast currently (or formerly) on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// A notice that is being displayed.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Toast identifier.
    pub id: ToastId,
    /// What is displayed.
    pub notice: Notice,
    /// Time left, as of `resumed_at` when running or exactly when paused.
    remaining: Duration,
    /// When the countdown last (re)started; `None` while paused.
    resumed_at: Option<Instant>,
}

impl Toast {
    /// Time left before auto-dismissal.
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.resumed_at {
            Some(since) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(since)),
            None => self.remaining,
        }
    }

    /// Remaining share of the full duration, in `0.0..=1.0`.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.notice.duration.is_zero() {
            return 0.0;
        }
        (self.remaining_at(now).as_secs_f64() / self.notice.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whether the countdown is currently paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.resumed_at.is_none()
    }

    fn pause(&mut self, now: Instant) {
        if let Some(since) = self.resumed_at.take() {
            self.remaining = self
                .remaining
                .saturating_sub(now.saturating_duration_since(since));
        }
    }

    fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        !self.is_paused() && self.remaining_at(now).is_zero()
    }
}

/// Stack of visible toasts with hover/focus pausing.
#[derive(Debug)]
pub struct NotificationCenter {
    /// Newest first.
    toasts: VecDeque<Toast>,
    next_id: u64,
    hovered: Option<ToastId>,
    window_focused: bool,
    max_per_position: usize,
}

impl NotificationCenter {
    /// Creates an empty center keeping at most `max_per_position` toasts in
    /// each corner.
    #[must_use]
    pub fn new(max_per_position: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            next_id: 0,
            hovered: None,
            window_focused: true,
            max_per_position: max_per_position.max(1),
        }
    }

    /// Shows a notice. It starts paused if the window is unfocused.
    pub fn push(&mut self, notice: Notice, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            toast = id.0,
            severity = ?notice.severity,
            message = %notice.message,
            "toast shown"
        );

        let position = notice.position;
        self.toasts.push_front(Toast {
            id,
            remaining: notice.duration,
            notice,
            resumed_at: self.window_focused.then_some(now),
        });

        while self.at(position).count() > self.max_per_position {
            let Some(idx) = self
                .toasts
                .iter()
                .rposition(|t| t.notice.position == position)
            else {
                break;
            };
            if let Some(dropped) = self.toasts.remove(idx) {
                self.forget_hover(dropped.id);
            }
        }
        id
    }

    /// Removes a toast immediately (user click). Returns whether it existed.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let Some(idx) = self.toasts.iter().position(|t| t.id == id) else {
            return false;
        };
        self.toasts.remove(idx);
        self.forget_hover(id);
        true
    }

    /// Dismisses the most recent toast, if any.
    pub fn dismiss_newest(&mut self) -> Option<ToastId> {
        let id = self.toasts.front()?.id;
        self.dismiss(id);
        Some(id)
    }

    /// Updates which toast the pointer is over.
    ///
    /// The hovered toast is paused; the previously hovered one resumes unless
    /// the window is unfocused.
    pub fn set_hovered(&mut self, id: Option<ToastId>, now: Instant) {
        if self.hovered == id {
            return;
        }
        if let Some(prev) = self.hovered.take()
            && self.window_focused
            && let Some(toast) = self.get_mut(prev)
        {
            toast.resume(now);
        }
        if let Some(next) = id
            && let Some(toast) = self.get_mut(next)
        {
            toast.pause(now);
            self.hovered = Some(next);
        }
    }

    /// Records terminal focus changes. Losing focus pauses every toast and
    /// forgets the hover, since the terminal does not report the pointer
    /// leaving; regaining it resumes all but the hovered one.
    pub fn set_window_focused(&mut self, focused: bool, now: Instant) {
        if self.window_focused == focused {
            return;
        }
        self.window_focused = focused;
        if !focused {
            self.hovered = None;
        }
        let hovered = self.hovered;
        for toast in &mut self.toasts {
            if !focused {
                toast.pause(now);
            } else if Some(toast.id) != hovered {
                toast.resume(now);
            }
        }
    }

    /// Removes toasts whose running time has elapsed and returns their ids.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.toasts.retain(|t| {
            if t.is_expired(now) {
                expired.push(t.id);
                false
            } else {
                true
            }
        });
        for id in &expired {
            self.forget_hover(*id);
        }
        expired
    }

    /// Remaining lifetime of a toast.
    #[must_use]
    pub fn remaining(&self, id: ToastId, now: Instant) -> Option<Duration> {
        self.toasts
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.remaining_at(now))
    }

    /// All visible toasts, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Visible toasts in one corner, newest first.
    pub fn at(&self, position: Position) -> impl Iterator<Item = &Toast> {
        self.toasts
            .iter()
            .filter(move |t| t.notice.position == position)
    }

    /// Number of visible toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether nothing is displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Currently hovered toast.
    #[must_use]
    pub const fn hovered(&self) -> Option<ToastId> {
        self.hovered
    }

    /// Whether the terminal window currently has focus.
    #[must_use]
    pub const fn is_window_focused(&self) -> bool {
        self.window_focused
    }

    fn get_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|t| t.id == id)
    }

    fn forget_hover(&mut self, id: ToastId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_POSITION)
    }
}
