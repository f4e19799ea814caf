//! Column domain model
//!
//! A column is a named, ordered bucket of task ids. Ordering is the
//! whole point: the board never reorders a column behind the engine's
//! back, and duplicates are refused at insertion time.

use serde::{Deserialize, Serialize};

use super::id::{ColumnId, TaskId};

/// A named, ordered bucket of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier
    pub id: ColumnId,

    /// Column heading
    pub title: String,

    /// Ordered task membership, duplicates forbidden
    task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates a new, empty column
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Creates a column with an initial task ordering (seed data)
    pub fn with_tasks(id: ColumnId, title: impl Into<String>, task_ids: Vec<TaskId>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids,
        }
    }

    /// The ordered task ids held by this column
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns true if the column holds no tasks
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Number of tasks in this column
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns true if this column holds the given task
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    /// Position of a task within this column's order
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    /// Appends a task to the end of the column
    ///
    /// Returns false (and leaves the order untouched) if the task is
    /// already a member.
    pub(crate) fn push_task(&mut self, task_id: TaskId) -> bool {
        if self.contains(&task_id) {
            return false;
        }
        self.task_ids.push(task_id);
        true
    }

    /// Inserts a task at the given position, clamped to the end
    pub(crate) fn insert_task(&mut self, index: usize, task_id: TaskId) -> bool {
        if self.contains(&task_id) {
            return false;
        }
        let index = index.min(self.task_ids.len());
        self.task_ids.insert(index, task_id);
        true
    }

    /// Removes a task from the column
    ///
    /// Returns false if the task was not a member.
    pub(crate) fn remove_task(&mut self, task_id: &TaskId) -> bool {
        match self.position(task_id) {
            Some(index) => {
                self.task_ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Moves a task from its current position to a new one
    ///
    /// List-move semantics: the task is removed first, then re-inserted
    /// at `to` within the shortened order, preserving the relative order
    /// of every other task.
    pub(crate) fn move_task(&mut self, from: usize, to: usize) {
        if from == to || from >= self.task_ids.len() {
            return;
        }
        let id = self.task_ids.remove(from);
        let to = to.min(self.task_ids.len());
        self.task_ids.insert(to, id);
    }
}
