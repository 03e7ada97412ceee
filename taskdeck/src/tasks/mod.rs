//! Personal task list: in-memory store and local persistence.
//!
//! [`TaskStore`] owns the collection and accepts [`TaskCommand`]s; every
//! accepted mutation is handed to a [`CommitHook`] exactly once, which for
//! the running app is [`TaskStorage`] writing the full collection to a
//! [`KeyValueStore`].

pub mod storage;
pub mod store;

pub use storage::{FileStore, KeyValueStore, MemoryStore, SaveStatus, StoreError, TaskStorage};
pub use store::{CommitHook, IdGenerator, Outcome, TaskCommand, TaskStore};

use thiserror::Error;

use crate::notifications::{DEFAULT_DURATION, Notice};

/// Default maximum task title length in characters.
pub const DEFAULT_MAX_TITLE_LEN: usize = 256;

/// Validation errors for task commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task title is empty after trimming.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Task title exceeds the configured maximum.
    #[error("task title too long (max {max} characters)")]
    TitleTooLong {
        /// Configured maximum length.
        max: usize,
    },
}

impl TaskError {
    /// The error toast shown when a command is rejected.
    #[must_use]
    pub fn notice(&self) -> Notice {
        let message = match self {
            Self::TitleEmpty => "Task title is required!".to_string(),
            Self::TitleTooLong { max } => format!("Task title is too long (max {max} characters)"),
        };
        Notice::error(message, DEFAULT_DURATION)
    }
}
