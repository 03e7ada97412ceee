//! Task store: the single source of truth for the task list.
//!
//! State is an immutable `Arc<[Task]>` snapshot. Each accepted command builds
//! a new snapshot, swaps it in, and notifies the [`CommitHook`] once. Rejected
//! commands and no-ops leave the snapshot (and the hook) untouched.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use taskdeck_model::{Priority, Task, TaskId, TaskStats};

use super::{DEFAULT_MAX_TITLE_LEN, TaskError};
use crate::notifications::{Notice, SHORT_DURATION};

/// Side effect run after every accepted mutation.
pub trait CommitHook {
    /// Receives the full collection as it stands after the mutation.
    fn on_commit(&mut self, tasks: &[Task]);
}

/// No-op hook for stores that are not persisted.
impl CommitHook for () {
    fn on_commit(&mut self, _tasks: &[Task]) {}
}

/// A user intent against the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Create a task and put it at the top of the list.
    Add {
        /// Raw title as typed; trimmed before validation.
        title: String,
        /// Raw description as typed.
        description: String,
        /// Chosen priority.
        priority: Priority,
    },
    /// Remove a task.
    Delete(TaskId),
    /// Flip a task's completion flag.
    Toggle(TaskId),
}

/// Result of an accepted (or ignored) command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A task was created.
    Added(Task),
    /// A task was removed.
    Deleted(Task),
    /// A task was marked complete.
    Completed(Task),
    /// A completed task was marked incomplete.
    Reopened(Task),
    /// The target task does not exist; nothing changed.
    Unchanged,
}

impl Outcome {
    /// Whether the collection changed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// The toast this outcome raises, if any.
    ///
    /// Reopening a task is deliberately silent.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Added(_) => Some(Notice::success("Task added successfully!", SHORT_DURATION)),
            Self::Deleted(_) => Some(Notice::info("Task deleted", SHORT_DURATION)),
            Self::Completed(_) => Some(Notice::success(
                "Task completed! Great job!",
                SHORT_DURATION,
            )),
            Self::Reopened(_) | Self::Unchanged => None,
        }
    }
}

/// Hands out strictly increasing, time-derived task ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Seeds the generator past every id in `tasks`.
    #[must_use]
    pub fn seeded(tasks: &[Task]) -> Self {
        Self {
            last: tasks.iter().map(|t| t.id.as_raw()).max().unwrap_or(0),
        }
    }

    /// Epoch milliseconds of `now`, bumped if needed to stay unique.
    pub fn next(&mut self, now: DateTime<Utc>) -> TaskId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        TaskId::from_raw(id)
    }
}

/// Owned task list with a command dispatcher.
pub struct TaskStore<H> {
    tasks: Arc<[Task]>,
    ids: IdGenerator,
    hook: H,
    max_title_len: usize,
}

impl<H: CommitHook> TaskStore<H> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(hook: H) -> Self {
        Self::open(hook, Vec::new())
    }

    /// Creates a store from a previously persisted collection.
    ///
    /// Records that break the collection invariants (duplicate id, blank
    /// title) are dropped with a warning; the first occurrence of an id wins.
    #[must_use]
    pub fn open(hook: H, tasks: Vec<Task>) -> Self {
        let loaded = tasks.len();
        let mut seen = HashSet::with_capacity(loaded);
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|t| !t.title.trim().is_empty() && seen.insert(t.id))
            .collect();
        if tasks.len() != loaded {
            tracing::warn!(
                loaded,
                kept = tasks.len(),
                "dropped invalid or duplicate tasks from stored collection"
            );
        }

        Self {
            ids: IdGenerator::seeded(&tasks),
            tasks: tasks.into(),
            hook,
            max_title_len: DEFAULT_MAX_TITLE_LEN,
        }
    }

    /// Sets the maximum title length in characters.
    #[must_use]
    pub fn with_max_title_len(mut self, max: usize) -> Self {
        self.max_title_len = max;
        self
    }

    /// Applies a command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TitleEmpty`] if an added title is blank, or
    /// [`TaskError::TitleTooLong`] if it exceeds the configured maximum.
    /// The collection is unchanged in both cases.
    pub fn dispatch(
        &mut self,
        command: TaskCommand,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TaskError> {
        let outcome = match command {
            TaskCommand::Add {
                title,
                description,
                priority,
            } => self.apply_add(&title, &description, priority, now)?,
            TaskCommand::Delete(id) => self.apply_delete(id),
            TaskCommand::Toggle(id) => self.apply_toggle(id),
        };

        if outcome.is_committed() {
            self.hook.on_commit(&self.tasks);
        } else {
            tracing::debug!("command targeted a missing task; ignored");
        }
        Ok(outcome)
    }

    /// Adds a task. See [`dispatch`](Self::dispatch).
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch) for [`TaskCommand::Add`].
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TaskError> {
        self.dispatch(
            TaskCommand::Add {
                title: title.to_string(),
                description: description.to_string(),
                priority,
            },
            now,
        )
    }

    /// Deletes a task; a missing id is a silent no-op.
    pub fn delete(&mut self, id: TaskId) -> Outcome {
        self.dispatch(TaskCommand::Delete(id), Utc::now())
            .unwrap_or(Outcome::Unchanged)
    }

    /// Toggles a task; a missing id is a silent no-op.
    pub fn toggle(&mut self, id: TaskId) -> Outcome {
        self.dispatch(TaskCommand::Toggle(id), Utc::now())
            .unwrap_or(Outcome::Unchanged)
    }

    /// Current snapshot, newest task first.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Task]> {
        Arc::clone(&self.tasks)
    }

    /// Current tasks as a slice.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Aggregate statistics of the current snapshot.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// The commit hook.
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// The commit hook, mutably.
    pub const fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    fn apply_add(
        &mut self,
        title: &str,
        description: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TaskError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TaskError::TitleEmpty);
        }
        if trimmed.chars().count() > self.max_title_len {
            return Err(TaskError::TitleTooLong {
                max: self.max_title_len,
            });
        }

        let task = Task::new(self.ids.next(now), trimmed, description, priority, now);
        let next: Vec<Task> = std::iter::once(task.clone())
            .chain(self.tasks.iter().cloned())
            .collect();
        self.tasks = next.into();
        tracing::debug!(task_id = %task.id, priority = %task.priority, "task added");
        Ok(Outcome::Added(task))
    }

    fn apply_delete(&mut self, id: TaskId) -> Outcome {
        let Some(removed) = self.get(id).cloned() else {
            return Outcome::Unchanged;
        };
        let next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.tasks = next.into();
        tracing::debug!(task_id = %id, "task deleted");
        Outcome::Deleted(removed)
    }

    fn apply_toggle(&mut self, id: TaskId) -> Outcome {
        let Some(updated) = self.get(id).map(Task::toggled) else {
            return Outcome::Unchanged;
        };
        let next: Vec<Task> = self
            .tasks
            .iter()
            .map(|t| if t.id == id { updated.clone() } else { t.clone() })
            .collect();
        self.tasks = next.into();
        tracing::debug!(task_id = %id, completed = updated.completed, "task toggled");
        if updated.completed {
            Outcome::Completed(updated)
        } else {
            Outcome::Reopened(updated)
        }
    }
}
