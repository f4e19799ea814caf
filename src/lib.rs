//! Kanban board engine
//!
//! An in-memory kanban board: ordered columns of ordered tasks, mutated
//! through explicit CRUD operations and a three-event drag lifecycle
//! (start, hover, drop). The [`engine::BoardEngine`] owns the board,
//! keeps its invariants, and is the only way to change it; the `cli`
//! module wraps it in a scriptable replay harness.

pub mod cli;
pub mod domain;
pub mod engine;

pub use domain::{Board, Column, ColumnId, Priority, Task, TaskId};
pub use engine::{BoardEngine, BoardError};
