//! Aggregate statistics derived from a task collection.

use crate::task::Task;

/// Counts shown in the stats row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// `total - completed`.
    pub pending: usize,
    /// Completed share as a whole percentage, rounded half up; 0 when empty.
    pub completion_rate: u8,
}

impl TaskStats {
    /// Computes statistics for a collection.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate: completion_rate(completed, total),
        }
    }
}

/// `round(completed / total * 100)` in integer arithmetic.
fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rate = (completed * 200 + total) / (total * 2);
    u8::try_from(rate.min(100)).unwrap_or(100)
}
