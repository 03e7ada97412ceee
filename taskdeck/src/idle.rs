//! Idle detection state machine.
//!
//! [`IdleMonitor`] has two states, `Active` (initial) and `Idle`. Activity
//! signals reset the countdown; once `timeout` passes without one, the next
//! [`poll`](IdleMonitor::poll) moves to `Idle`. Transitions are
//! edge-triggered: each one is reported exactly once, and repeated polls or
//! activity bursts in the same state report nothing.
//!
//! The monitor does no I/O and owns no timers. The caller injects activity
//! and the current time, which keeps it testable without a terminal.

use std::time::{Duration, Instant};

/// Default span without activity before the user counts as idle.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default minimum spacing between processed activity signals.
pub const DEFAULT_ACTIVITY_THROTTLE: Duration = Duration::from_millis(500);

/// Timing parameters for [`IdleMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleConfig {
    /// Inactivity span that triggers the idle state.
    pub timeout: Duration,
    /// Activity signals closer together than this are dropped while active.
    pub throttle: Duration,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_IDLE_TIMEOUT,
            throttle: DEFAULT_ACTIVITY_THROTTLE,
        }
    }
}

/// Current state of the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    /// User activity seen within the timeout.
    Active,
    /// No activity for at least the timeout.
    Idle,
}

/// A state change reported by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleTransition {
    /// Active → Idle.
    BecameIdle,
    /// Idle → Active, with how long the idle period lasted.
    BecameActive {
        /// Time between entering idle and the activity that ended it.
        idle_for: Duration,
    },
}

/// Callback-style consumer of idle transitions.
pub trait IdleHandler {
    /// Called once when the user becomes idle.
    fn on_idle(&mut self);
    /// Called once when an idle user becomes active again.
    fn on_active(&mut self, idle_for: Duration);
}

impl IdleTransition {
    /// Routes this transition to the matching handler callback.
    pub fn dispatch<H: IdleHandler + ?Sized>(self, handler: &mut H) {
        match self {
            Self::BecameIdle => handler.on_idle(),
            Self::BecameActive { idle_for } => handler.on_active(idle_for),
        }
    }
}

/// Activity watcher with a countdown to idle.
#[derive(Debug, Clone)]
pub struct IdleMonitor {
    config: IdleConfig,
    state: IdleState,
    last_activity: Instant,
    /// When the last activity signal was accepted (throttle reference).
    last_processed: Option<Instant>,
    idle_since: Option<Instant>,
}

impl IdleMonitor {
    /// Creates a monitor in the `Active` state with the countdown starting
    /// at `now`.
    #[must_use]
    pub const fn new(config: IdleConfig, now: Instant) -> Self {
        Self {
            config,
            state: IdleState::Active,
            last_activity: now,
            last_processed: None,
            idle_since: None,
        }
    }

    /// Records a user activity signal.
    ///
    /// Returns `Some(BecameActive)` if this signal ended an idle period.
    pub fn record_activity(&mut self, now: Instant) -> Option<IdleTransition> {
        if self.state == IdleState::Active
            && let Some(prev) = self.last_processed
            && now.saturating_duration_since(prev) < self.config.throttle
        {
            return None;
        }

        self.last_processed = Some(now);
        self.last_activity = now;

        if self.state == IdleState::Idle {
            self.state = IdleState::Active;
            let idle_for = self
                .idle_since
                .take()
                .map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
            tracing::info!(idle_ms = idle_for.as_millis(), "user active again");
            return Some(IdleTransition::BecameActive { idle_for });
        }
        None
    }

    /// Checks the countdown.
    ///
    /// Returns `Some(BecameIdle)` the first time the timeout is observed to
    /// have elapsed; `None` otherwise.
    pub fn poll(&mut self, now: Instant) -> Option<IdleTransition> {
        if self.state == IdleState::Idle {
            return None;
        }
        if now.saturating_duration_since(self.last_activity) < self.config.timeout {
            return None;
        }
        self.state = IdleState::Idle;
        self.idle_since = Some(now);
        tracing::info!(
            timeout_secs = self.config.timeout.as_secs(),
            "user idle"
        );
        Some(IdleTransition::BecameIdle)
    }

    /// Time until the idle transition; zero once idle.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.state {
            IdleState::Idle => Duration::ZERO,
            IdleState::Active => self
                .config
                .timeout
                .saturating_sub(now.saturating_duration_since(self.last_activity)),
        }
    }

    /// Whole seconds until idle, rounded down.
    #[must_use]
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        self.remaining(now).as_secs()
    }

    /// Whether the monitor is in the `Idle` state.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, IdleState::Idle)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> IdleState {
        self.state
    }

    /// Configured timing parameters.
    #[must_use]
    pub const fn config(&self) -> IdleConfig {
        self.config
    }
}
