use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a task. Survives edits, moves and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        TaskId::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Records written before ids existed get a fresh one on load
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    /// Optional; empty when unset
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
}

impl Task {
    /// Create a task stamped with the current time
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            id: TaskId::new(),
            title: title.into(),
            description: description.into(),
            created_at: now_str(),
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Tasks compare by identity, not by content
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

fn now_str() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
