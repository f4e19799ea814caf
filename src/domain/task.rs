//! Task domain model
//!
//! Tasks are the cards on the board: a piece of content with a priority.
//! Content and priority are fixed at creation; the only thing that
//! changes over a task's life is which column order holds its id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
#[error("Invalid priority '{0}': expected 'low', 'medium', or 'high'")]
pub struct PriorityParseError(String);

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Returns a display label for the priority
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(PriorityParseError(other.to_string())),
        }
    }
}

/// A unit of work on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Card text
    pub content: String,

    /// Priority level
    pub priority: Priority,
}

impl Task {
    /// Creates a new task
    pub fn new(id: TaskId, content: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            content: content.into(),
            priority,
        }
    }
}
