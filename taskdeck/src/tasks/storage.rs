//! Local persistence for the task list.
//!
//! Defines the [`KeyValueStore`] trait for the host string store, plus
//! [`TaskStorage`] which reads and writes the whole collection under one
//! reserved key.
//!
//! # Failure policy
//!
//! Storage health must never affect the UI:
//! 1. Absent or unparseable data loads as an empty list.
//! 2. Write and remove failures are logged and swallowed.
//! 3. The first failed save after a healthy period queues a one-shot
//!    warning the UI can show as a toast.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use taskdeck_model::Task;
use taskdeck_model::codec::{self, TASKS_KEY};

use super::store::CommitHook;
use crate::notifications::{DEFAULT_DURATION, Notice};

/// Errors that can occur in a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key cannot be mapped onto the store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed (disk full, quota exceeded, ...).
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Filesystem error on a specific path.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Reads a value; `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a temporary sibling and are renamed into place, so readers
/// only ever see a complete previous or complete new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] unless the key is a non-empty run
    /// of ASCII letters, digits, `-` or `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(Self::io_error(&self.dir))?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(Self::io_error(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            Self::io_error(&path)(e)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path)(e)),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory [`KeyValueStore`] for tests.
///
/// Clones share the same entries, so a test can keep a handle while the
/// app owns another. Reads and writes can be switched to fail to simulate
/// a broken or full disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Makes every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Raw value under `key`, bypassing failure injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.lock().entries.get(key).cloned()
    }

    /// Stores a raw value, bypassing failure injection.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.state
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    /// Keys currently present.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.state.lock().entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(StoreError::ReadFailed("simulated read failure".to_string()));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StoreError::WriteFailed("quota exceeded".to_string()));
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StoreError::WriteFailed("simulated remove failure".to_string()));
        }
        state.entries.remove(key);
        Ok(())
    }
}

/// Outcome of a [`TaskStorage::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// The full collection was written.
    Saved,
    /// The write failed; the in-memory list is unaffected.
    Failed,
}

/// Persistence adapter for the task collection.
///
/// Every operation touches only the reserved `"tasks"` key and never
/// returns an error to the caller.
pub struct TaskStorage<S> {
    store: S,
    healthy: bool,
    warning_pending: bool,
}

impl<S: KeyValueStore> TaskStorage<S> {
    /// Wraps a key-value store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            healthy: true,
            warning_pending: false,
        }
    }

    /// Loads the stored collection.
    ///
    /// Absent data, read failures and corrupt data all yield an empty list;
    /// the latter two are logged.
    #[must_use]
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::error!(error = %err, key = TASKS_KEY, "error loading tasks");
                return Vec::new();
            }
        };

        match codec::decode(&raw) {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    key = TASKS_KEY,
                    bytes = raw.len(),
                    "stored tasks are corrupt; starting with an empty list"
                );
                Vec::new()
            }
        }
    }

    /// Writes the full collection, replacing whatever was stored.
    pub fn save(&mut self, tasks: &[Task]) -> SaveStatus {
        let result = codec::encode(tasks)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                self.store
                    .set(TASKS_KEY, &text)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => {
                if !self.healthy {
                    tracing::info!("task storage recovered");
                }
                self.healthy = true;
                SaveStatus::Saved
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    key = TASKS_KEY,
                    count = tasks.len(),
                    "error saving tasks; keeping changes in memory only"
                );
                if self.healthy {
                    self.warning_pending = true;
                }
                self.healthy = false;
                SaveStatus::Failed
            }
        }
    }

    /// Removes the stored collection.
    pub fn clear(&self) {
        match self.store.remove(TASKS_KEY) {
            Ok(()) => tracing::info!("cleared stored tasks"),
            Err(err) => tracing::error!(error = %err, key = TASKS_KEY, "error clearing tasks"),
        }
    }

    /// Takes the pending save-failure warning, if one was raised since the
    /// last call.
    pub fn take_warning(&mut self) -> Option<Notice> {
        std::mem::take(&mut self.warning_pending).then(|| {
            Notice::warning(
                "Could not save tasks; changes are kept for this session",
                DEFAULT_DURATION,
            )
        })
    }

    /// Whether the last save succeeded.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.healthy
    }
}

impl<S: KeyValueStore> CommitHook for TaskStorage<S> {
    fn on_commit(&mut self, tasks: &[Task]) {
        self.save(tasks);
    }
}
