//! Persisted layout of the task collection.
//!
//! The whole collection is stored as one JSON array under [`TASKS_KEY`].
//! Field names are camelCase and `createdAt` is an ISO-8601 string, so files
//! written by the browser version of the widget load unchanged.

use crate::task::Task;

/// Key under which the collection is stored.
pub const TASKS_KEY: &str = "tasks";

/// Error type for collection encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The collection could not be serialized.
    #[error("task encode error: {0}")]
    Encode(String),
    /// The stored text is not a valid task array.
    #[error("task decode error: {0}")]
    Decode(String),
}

/// Encodes a task collection into its JSON text form.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decodes a task collection from its JSON text form.
///
/// # Errors
///
/// Returns `CodecError::Decode` if the text is not a JSON array of tasks.
pub fn decode(text: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))
}
