//! Typed identifiers for tasks and columns
//!
//! ID Format:
//! - Task IDs: `task-{7-char-hash}` (e.g., `task-7f2b4c1`)
//! - Column IDs: `column-{7-char-hash}` (e.g., `column-9d3e5f2`)
//!
//! Generated ids hash the entity's text together with the creation
//! timestamp and a monotonic counter, so the same text never yields the
//! same id twice. Parsed ids are accepted as-is: the drag-gesture layer
//! and seed data deal in opaque strings, and the engine disambiguates
//! task vs column by membership lookup, never by prefix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Task ID must be a non-empty string, got '{0}'")]
    InvalidTaskId(String),

    #[error("Column ID must be a non-empty string, got '{0}'")]
    InvalidColumnId(String),
}

/// Generates a 7-character hash from text, timestamp, and sequence number
fn generate_hash(text: &str, timestamp: DateTime<Utc>, seq: u64) -> String {
    let input = format!(
        "{}{}{}",
        text,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        seq
    );
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Identifier of a single task
///
/// Opaque and collision-free; the wrapped string is whatever the seed
/// data or [`IdGenerator`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Returns the id as a plain string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::InvalidTaskId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

// Lets id-keyed maps be probed with the raw strings the gesture layer
// reports, without allocating a TaskId per lookup.
impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a single column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnId(String);

impl ColumnId {
    /// Returns the id as a plain string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColumnId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::InvalidColumnId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ColumnId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnId> for String {
    fn from(id: ColumnId) -> Self {
        id.0
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Produces fresh, collision-free ids for new tasks and columns
///
/// The counter makes two generations with the same text and timestamp
/// distinct; the engine additionally re-draws if a generated id already
/// exists on the board.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    /// Creates a generator starting at sequence zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh task id from the task's content
    pub fn task_id(&mut self, content: &str) -> TaskId {
        self.counter += 1;
        TaskId(format!(
            "task-{}",
            generate_hash(content, Utc::now(), self.counter)
        ))
    }

    /// Generates a fresh column id from the column's title
    pub fn column_id(&mut self, title: &str) -> ColumnId {
        self.counter += 1;
        ColumnId(format!(
            "column-{}",
            generate_hash(title, Utc::now(), self.counter)
        ))
    }
}
