//! Property-based tests for the persisted task layout.
//!
//! Uses proptest to verify:
//! 1. Any valid task collection survives encode → decode unchanged.
//! 2. Arbitrary text never causes a panic in `decode`.
//! 3. Derived statistics stay internally consistent.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use taskdeck_model::codec;
use taskdeck_model::{Priority, Task, TaskId, TaskStats};

/// Strategy for generating arbitrary `Priority` values.
fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

/// Strategy for generating valid tasks (non-empty trimmed title,
/// millisecond timestamps between 2000 and 2100).
fn arb_task() -> impl Strategy<Value = Task> {
    (
        0..=(1u64 << 53),
        "[^\\s]{1}[^\x00]{0,64}",
        "[^\x00]{0,128}",
        arb_priority(),
        any::<bool>(),
        946_684_800_000_i64..4_102_444_800_000_i64,
    )
        .prop_map(|(id, title, description, priority, completed, ms)| {
            let created_at = Utc
                .timestamp_millis_opt(ms)
                .single()
                .unwrap_or_else(Utc::now);
            let mut task = Task::new(TaskId::from_raw(id), &title, &description, priority, created_at);
            task.completed = completed;
            task
        })
}

proptest! {
    /// Any collection survives an encode → decode round-trip.
    #[test]
    fn collection_round_trip(tasks in prop::collection::vec(arb_task(), 0..16)) {
        let text = codec::encode(&tasks).expect("encode should succeed");
        let decoded = codec::decode(&text).expect("decode should succeed");
        prop_assert_eq!(tasks, decoded);
    }

    /// Arbitrary text never panics the decoder.
    #[test]
    fn random_text_decode_no_panic(text in ".{0,256}") {
        let _ = codec::decode(&text);
    }

    /// Toggling twice restores the original task.
    #[test]
    fn toggle_is_an_involution(task in arb_task()) {
        prop_assert_eq!(task.toggled().toggled(), task);
    }

    /// Counts always add up and the rate stays within 0..=100.
    #[test]
    fn stats_are_consistent(tasks in prop::collection::vec(arb_task(), 0..32)) {
        let stats = TaskStats::from_tasks(&tasks);
        prop_assert_eq!(stats.total, tasks.len());
        prop_assert_eq!(stats.completed + stats.pending, stats.total);
        prop_assert!(stats.completion_rate <= 100);
        if stats.total == 0 {
            prop_assert_eq!(stats.completion_rate, 0);
        }
    }
}
