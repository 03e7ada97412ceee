//! Integration tests for task persistence.
//!
//! Covers the file-backed store (atomic replace, missing and corrupt data),
//! the in-memory store's failure injection, and persistence-on-commit through
//! the task store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use taskdeck::tasks::{
    FileStore, KeyValueStore, MemoryStore, SaveStatus, StoreError, TaskStorage, TaskStore,
};
use taskdeck_model::codec::TASKS_KEY;
use taskdeck_model::{Priority, Task, TaskId};

fn sample_tasks() -> Vec<Task> {
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let mut done = Task::new(TaskId::from_raw(2), "Call bank", "before 5pm", Priority::High, now);
    done.completed = true;
    vec![
        done,
        Task::new(TaskId::from_raw(1), "Buy milk", "", Priority::Low, now),
    ]
}

// ===========================================================================
// FileStore
// ===========================================================================

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = TaskStorage::new(FileStore::new(dir.path()));

    let tasks = sample_tasks();
    assert_eq!(storage.save(&tasks), SaveStatus::Saved);
    assert!(dir.path().join("tasks.json").exists());

    let reopened = TaskStorage::new(FileStore::new(dir.path()));
    assert_eq!(reopened.load(), tasks);
}

#[test]
fn file_store_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut storage = TaskStorage::new(FileStore::new(&nested));
    assert_eq!(storage.save(&sample_tasks()), SaveStatus::Saved);
    assert_eq!(storage.load().len(), 2);
}

#[test]
fn save_replaces_previous_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = TaskStorage::new(FileStore::new(dir.path()));
    storage.save(&sample_tasks());
    storage.save(&[]);
    assert!(storage.load().is_empty());

    // No temporary files are left behind.
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["tasks.json"]);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = TaskStorage::new(FileStore::new(dir.path()));
    assert!(storage.load().is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{not json").unwrap();
    let storage = TaskStorage::new(FileStore::new(dir.path()));
    assert!(storage.load().is_empty());
}

#[test]
fn wrong_shape_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), r#"{"id": 1}"#).unwrap();
    let storage = TaskStorage::new(FileStore::new(dir.path()));
    assert!(storage.load().is_empty());
}

#[test]
fn records_missing_optional_fields_get_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tasks.json"),
        r#"[{"id": 7, "title": "Legacy", "createdAt": "2024-01-02T03:04:05.678Z"}]"#,
    )
    .unwrap();
    let storage = TaskStorage::new(FileStore::new(dir.path()));
    let tasks = storage.load();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].priority, Priority::Medium);
    assert!(!tasks[0].completed);
    assert!(tasks[0].description.is_empty());
}

#[test]
fn clear_removes_stored_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = TaskStorage::new(FileStore::new(dir.path()));
    storage.save(&sample_tasks());
    storage.clear();
    assert!(storage.load().is_empty());
    // Clearing twice is fine.
    storage.clear();
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert!(matches!(
        store.set("../escape", "x"),
        Err(StoreError::InvalidKey(_))
    ));
}

// ===========================================================================
// MemoryStore + failure handling
// ===========================================================================

#[test]
fn only_the_reserved_key_is_used() {
    let backend = MemoryStore::new();
    let mut storage = TaskStorage::new(backend.clone());
    storage.save(&sample_tasks());
    assert_eq!(backend.keys(), [TASKS_KEY.to_string()]);
}

#[test]
fn read_failure_loads_empty() {
    let backend = MemoryStore::new();
    let mut storage = TaskStorage::new(backend.clone());
    storage.save(&sample_tasks());
    backend.set_fail_reads(true);
    assert!(storage.load().is_empty());
}

#[test]
fn write_failure_keeps_previous_value_and_warns_once() {
    let backend = MemoryStore::new();
    let mut storage = TaskStorage::new(backend.clone());
    storage.save(&sample_tasks());
    let before = backend.raw(TASKS_KEY).unwrap();

    backend.set_fail_writes(true);
    assert_eq!(storage.save(&[]), SaveStatus::Failed);
    assert_eq!(storage.save(&[]), SaveStatus::Failed);
    assert_eq!(backend.raw(TASKS_KEY).unwrap(), before);
    assert!(!storage.is_healthy());
    assert!(storage.take_warning().is_some());
    assert!(storage.take_warning().is_none());

    backend.set_fail_writes(false);
    assert_eq!(storage.save(&[]), SaveStatus::Saved);
    assert!(storage.is_healthy());
}

// ===========================================================================
// Persistence on commit
// ===========================================================================

#[test]
fn every_commit_is_persisted() {
    let backend = MemoryStore::new();
    let mut store = TaskStore::new(TaskStorage::new(backend.clone()));
    let now = Utc.timestamp_millis_opt(1_000).unwrap();

    store.add("Buy milk", "", Priority::Low, now).unwrap();
    store.add("Call bank", "", Priority::High, now).unwrap();
    let bank = store.tasks()[0].id;
    store.toggle(bank);

    let reloaded = TaskStorage::new(backend.clone()).load();
    assert_eq!(reloaded, store.tasks());

    // Rejected commands do not write.
    backend.put_raw(TASKS_KEY, "sentinel");
    assert!(store.add("   ", "", Priority::Low, now).is_err());
    store.delete(TaskId::from_raw(999));
    assert_eq!(backend.raw(TASKS_KEY).as_deref(), Some("sentinel"));
}

#[test]
fn reopened_store_continues_ids() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.timestamp_millis_opt(5_000).unwrap();

    let mut first = TaskStore::new(TaskStorage::new(FileStore::new(dir.path())));
    first.add("one", "", Priority::Medium, now).unwrap();
    let first_id = first.tasks()[0].id;

    let storage = TaskStorage::new(FileStore::new(dir.path()));
    let loaded = storage.load();
    let mut second = TaskStore::open(storage, loaded);
    second.add("two", "", Priority::Medium, now).unwrap();

    assert!(second.tasks()[0].id > first_id);
    assert_eq!(second.len(), 2);
}
