//! Board aggregate
//!
//! The board is the single root entity: it owns every task and column
//! and the ordering between columns. All lookups external consumers
//! need are read-only; mutation goes through crate-private primitives
//! driven by the engine, which is responsible for the invariants
//! checked by [`Board::validate`]:
//!
//! 1. Every task id referenced by a column exists.
//! 2. Every task belongs to exactly one column.
//! 3. The column order is a bijection over the column map.
//! 4. There is always at least one column.
//! 5. Ids are globally unique across tasks and columns.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::column::Column;
use super::id::{ColumnId, TaskId};
use super::task::{Priority, Task};

/// A broken board invariant, reported by [`Board::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("Column '{column}' references unknown task '{task}'")]
    UnknownTaskInColumn { column: ColumnId, task: TaskId },

    #[error("Task '{task}' appears in more than one column position")]
    DuplicateMembership { task: TaskId },

    #[error("Task '{task}' does not belong to any column")]
    OrphanTask { task: TaskId },

    #[error("Column order references unknown column '{column}'")]
    UnknownColumnInOrder { column: ColumnId },

    #[error("Column '{column}' appears more than once in the column order")]
    DuplicateColumnInOrder { column: ColumnId },

    #[error("Column '{column}' is missing from the column order")]
    ColumnMissingFromOrder { column: ColumnId },

    #[error("Board has no columns")]
    NoColumns,

    #[error("Id '{id}' is used by both a task and a column")]
    SharedId { id: String },
}

/// The root aggregate: tasks, columns, and column ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    tasks: HashMap<TaskId, Task>,
    columns: HashMap<ColumnId, Column>,
    column_order: Vec<ColumnId>,
}

impl Board {
    /// Creates a board holding a single empty column
    ///
    /// A board can never have fewer than one column, so construction
    /// starts from one.
    pub fn new(first_column: Column) -> Self {
        let id = first_column.id.clone();
        let mut columns = HashMap::new();
        columns.insert(id.clone(), first_column);
        Self {
            tasks: HashMap::new(),
            columns,
            column_order: vec![id],
        }
    }

    /// Assembles a board from seed tasks and columns
    ///
    /// The column order follows the order of `columns`. No validation
    /// happens here; the engine validates seeds at construction.
    pub fn from_parts(tasks: Vec<Task>, columns: Vec<Column>) -> Self {
        let column_order = columns.iter().map(|column| column.id.clone()).collect();
        Self {
            tasks: tasks.into_iter().map(|task| (task.id.clone(), task)).collect(),
            columns: columns
                .into_iter()
                .map(|column| (column.id.clone(), column))
                .collect(),
            column_order,
        }
    }

    /// The built-in seed board: five tasks across three columns
    pub fn sample() -> Self {
        fn task(id: &str, content: &str, priority: Priority) -> Task {
            Task::new(id.parse().expect("static id"), content, priority)
        }
        fn column(id: &str, title: &str, tasks: &[&str]) -> Column {
            let task_ids = tasks.iter().map(|t| t.parse().expect("static id")).collect();
            Column::with_tasks(id.parse().expect("static id"), title, task_ids)
        }

        Self::from_parts(
            vec![
                task("task-1", "Create login page", Priority::High),
                task("task-2", "Design database schema", Priority::Medium),
                task("task-3", "API integration", Priority::High),
                task("task-4", "Write documentation", Priority::Low),
                task("task-5", "Unit testing", Priority::Medium),
            ],
            vec![
                column("column-1", "To do", &["task-1", "task-2", "task-3", "task-4"]),
                column("column-2", "In progress", &["task-5"]),
                column("column-3", "Done", &[]),
            ],
        )
    }

    /// All tasks, keyed by id
    pub fn tasks(&self) -> &HashMap<TaskId, Task> {
        &self.tasks
    }

    /// All columns, keyed by id
    pub fn columns(&self) -> &HashMap<ColumnId, Column> {
        &self.columns
    }

    /// Column ids in display order
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Number of tasks on the board
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Looks up a task by raw id
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Looks up a column by raw id
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id)
    }

    /// The first column in display order, the default target for new tasks
    pub fn first_column(&self) -> Option<&ColumnId> {
        self.column_order.first()
    }

    /// Finds the column currently owning a task
    ///
    /// Scans in display order, so the answer is deterministic even on a
    /// board that (transiently) violates single-membership.
    pub fn column_of_task(&self, task_id: &str) -> Option<&ColumnId> {
        self.column_order.iter().find(|column_id| {
            self.columns
                .get(column_id.as_str())
                .is_some_and(|column| column.task_ids().iter().any(|t| t.as_str() == task_id))
        })
    }

    /// Resolves a raw drag target id to the column it implies
    ///
    /// Membership lookup only, never the id's spelling: an id naming a
    /// column resolves to that column; an id naming a task resolves to
    /// the column owning the task; anything else does not resolve.
    pub fn resolve_column(&self, raw_id: &str) -> Option<ColumnId> {
        if let Some(column) = self.columns.get(raw_id) {
            return Some(column.id.clone());
        }
        self.column_of_task(raw_id).cloned()
    }

    /// Returns true if the raw id names a column (not a task)
    pub fn is_column(&self, raw_id: &str) -> bool {
        self.columns.contains_key(raw_id)
    }

    /// Checks all board invariants, reporting the first violation found
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.column_order.is_empty() {
            return Err(InvariantViolation::NoColumns);
        }

        // Column order is a bijection over the column map.
        let mut ordered = HashSet::new();
        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id.as_str()) {
                return Err(InvariantViolation::UnknownColumnInOrder {
                    column: column_id.clone(),
                });
            }
            if !ordered.insert(column_id) {
                return Err(InvariantViolation::DuplicateColumnInOrder {
                    column: column_id.clone(),
                });
            }
        }
        for column_id in self.columns.keys() {
            if !ordered.contains(column_id) {
                return Err(InvariantViolation::ColumnMissingFromOrder {
                    column: column_id.clone(),
                });
            }
        }

        // Every referenced task exists and belongs to exactly one slot.
        let mut seen = HashSet::new();
        for column_id in &self.column_order {
            let column = &self.columns[column_id];
            for task_id in column.task_ids() {
                if !self.tasks.contains_key(task_id) {
                    return Err(InvariantViolation::UnknownTaskInColumn {
                        column: column_id.clone(),
                        task: task_id.clone(),
                    });
                }
                if !seen.insert(task_id) {
                    return Err(InvariantViolation::DuplicateMembership {
                        task: task_id.clone(),
                    });
                }
            }
        }
        for task_id in self.tasks.keys() {
            if !seen.contains(task_id) {
                return Err(InvariantViolation::OrphanTask {
                    task: task_id.clone(),
                });
            }
        }

        // Ids are unique across the two entity kinds.
        for column_id in self.columns.keys() {
            if self.tasks.contains_key(column_id.as_str()) {
                return Err(InvariantViolation::SharedId {
                    id: column_id.as_str().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Inserts a task and appends it to the end of the given column
    pub(crate) fn insert_task(&mut self, task: Task, column_id: &ColumnId) -> bool {
        let Some(column) = self.columns.get_mut(column_id) else {
            return false;
        };
        if !column.push_task(task.id.clone()) {
            return false;
        }
        self.tasks.insert(task.id.clone(), task);
        true
    }

    /// Removes a task entry from the task map
    pub(crate) fn remove_task_entry(&mut self, task_id: &TaskId) -> Option<Task> {
        self.tasks.remove(task_id)
    }

    /// Mutable access to a column, for order surgery
    pub(crate) fn column_mut(&mut self, column_id: &ColumnId) -> Option<&mut Column> {
        self.columns.get_mut(column_id)
    }

    /// Inserts a column and appends it to the end of the column order
    pub(crate) fn insert_column(&mut self, column: Column) -> bool {
        if self.columns.contains_key(column.id.as_str()) {
            return false;
        }
        self.column_order.push(column.id.clone());
        self.columns.insert(column.id.clone(), column);
        true
    }

    /// Removes a column from the map and the order, returning it
    ///
    /// The caller cascades the removed column's tasks.
    pub(crate) fn remove_column(&mut self, column_id: &ColumnId) -> Option<Column> {
        let column = self.columns.remove(column_id)?;
        self.column_order.retain(|id| id != column_id);
        Some(column)
    }
}
