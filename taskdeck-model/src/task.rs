//! Task types for the personal task list.
//!
//! A [`Task`] is created once from user input, may have its completion flag
//! flipped any number of times, and is otherwise immutable until removed.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Identifiers are derived from the creation time in epoch milliseconds and
/// serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority as chosen in the add-task form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (form default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The next priority, wrapping from `High` to `Low`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// The previous priority, wrapping from `Low` to `High`.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }

    /// Lowercase label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-entered unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, time-derived identifier.
    pub id: TaskId,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description; empty when none was given.
    #[serde(default)]
    pub description: String,
    /// Priority badge.
    #[serde(default)]
    pub priority: Priority,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Creation time, millisecond precision. Never changes.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an uncompleted task.
    ///
    /// Title and description are trimmed and the timestamp is truncated to
    /// milliseconds so the value survives the persisted layout unchanged.
    /// Title validation is the caller's job.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: &str,
        description: &str,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            priority,
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    /// Returns a copy with the completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Whether a description was entered.
    #[must_use]
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}
