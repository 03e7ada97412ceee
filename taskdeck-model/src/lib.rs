//! Shared data model for `TaskDeck`: tasks, derived statistics, and the
//! persisted JSON layout.

pub mod codec;
pub mod stats;
pub mod task;

pub use stats::TaskStats;
pub use task::{Priority, Task, TaskId};
