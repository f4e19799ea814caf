//! Domain models for the kanban board
//!
//! Contains the board data model without any I/O concerns.

mod board;
mod column;
mod id;
mod task;

pub use board::{Board, InvariantViolation};
pub use column::Column;
pub use id::{ColumnId, IdError, IdGenerator, TaskId};
pub use task::{Priority, PriorityParseError, Task};
