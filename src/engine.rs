//! Board state engine
//!
//! Owns the live [`Board`], the drag subject, and a version counter,
//! and exposes the only mutations the host is allowed to make: the
//! CRUD operations and the three drag-lifecycle handlers.
//!
//! CRUD operations report failures as [`BoardError`] values and leave
//! the board untouched when they do. The drag handlers are deliberately
//! forgiving instead: a fast pointer can hand them stale or boundary
//! ids mid-gesture, so an unresolvable id is a benign no-op and the
//! return value only says whether the board changed.
//!
//! Cross-column moves happen live in [`BoardEngine::drag_over`] so the
//! host can show the card tracking the pointer; within-column
//! reordering waits for [`BoardEngine::drag_end`], once the final drop
//! index is known. Every operation runs to completion under `&mut
//! self`, so a caller never observes a half-applied transition.

use thiserror::Error;

use crate::domain::{Board, Column, ColumnId, IdGenerator, InvariantViolation, Priority, Task, TaskId};

/// Why a board operation was refused
#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("Text is empty or whitespace-only")]
    InvalidInput,

    #[error("Unknown task or column reference: '{0}'")]
    UnknownReference(String),

    #[error("The last remaining column cannot be deleted")]
    LastColumnProtected,
}

/// The board mutation engine
#[derive(Debug)]
pub struct BoardEngine {
    board: Board,
    /// Drag subject, held weakly as an id; resolved on read so a task
    /// deleted mid-gesture simply stops resolving.
    active: Option<TaskId>,
    /// The column the in-flight gesture first dragged its task out of.
    /// Once a hover has committed a cross-column move, the drop must
    /// not reorder the destination on top of it; current membership
    /// alone can no longer tell, because the live preview already made
    /// the destination the owning column.
    drag_origin: Option<(TaskId, ColumnId)>,
    ids: IdGenerator,
    version: u64,
}

impl BoardEngine {
    /// Creates an engine over a seed board, validating it first
    pub fn new(board: Board) -> Result<Self, InvariantViolation> {
        board.validate()?;
        Ok(Self {
            board,
            active: None,
            drag_origin: None,
            ids: IdGenerator::new(),
            version: 0,
        })
    }

    /// Creates an engine over the built-in sample board
    pub fn sample() -> Self {
        Self::new(Board::sample()).expect("sample board is valid")
    }

    /// Read-only view of the current board snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Monotonic counter, bumped on every observable change
    ///
    /// A host re-renders when the version moves.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The task currently being dragged, if any
    pub fn active_task(&self) -> Option<&Task> {
        self.active
            .as_ref()
            .and_then(|id| self.board.tasks().get(id))
    }

    /// Adds a task to the end of a column
    ///
    /// With no column given the task lands in the first column of the
    /// display order. Content that trims to empty is refused.
    pub fn add_task(
        &mut self,
        content: &str,
        priority: Priority,
        column: Option<&ColumnId>,
    ) -> Result<TaskId, BoardError> {
        if content.trim().is_empty() {
            return Err(BoardError::InvalidInput);
        }

        let column_id = match column {
            Some(id) => {
                if self.board.column(id.as_str()).is_none() {
                    return Err(BoardError::UnknownReference(id.to_string()));
                }
                id.clone()
            }
            None => self
                .board
                .first_column()
                .cloned()
                .ok_or_else(|| BoardError::UnknownReference("first column".to_string()))?,
        };

        let id = self.fresh_task_id(content);
        let inserted = self
            .board
            .insert_task(Task::new(id.clone(), content, priority), &column_id);
        debug_assert!(inserted);

        self.bump();
        Ok(id)
    }

    /// Deletes a task, removing it from its owning column
    ///
    /// A second delete of the same id reports `UnknownReference` and
    /// leaves the board exactly as the first delete did.
    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<(), BoardError> {
        let Some(owner) = self.board.column_of_task(task_id.as_str()).cloned() else {
            return Err(BoardError::UnknownReference(task_id.to_string()));
        };

        if let Some(column) = self.board.column_mut(&owner) {
            column.remove_task(task_id);
        }
        self.board.remove_task_entry(task_id);

        self.bump();
        Ok(())
    }

    /// Adds an empty column to the end of the display order
    pub fn add_column(&mut self, title: &str) -> Result<ColumnId, BoardError> {
        if title.trim().is_empty() {
            return Err(BoardError::InvalidInput);
        }

        let id = self.fresh_column_id(title);
        let inserted = self.board.insert_column(Column::new(id.clone(), title));
        debug_assert!(inserted);

        self.bump();
        Ok(id)
    }

    /// Deletes a column and every task it owns
    ///
    /// The last remaining column is protected and cannot be deleted.
    pub fn delete_column(&mut self, column_id: &ColumnId) -> Result<(), BoardError> {
        if self.board.column(column_id.as_str()).is_none() {
            return Err(BoardError::UnknownReference(column_id.to_string()));
        }
        if self.board.column_order().len() <= 1 {
            return Err(BoardError::LastColumnProtected);
        }

        if let Some(column) = self.board.remove_column(column_id) {
            for task_id in column.task_ids() {
                self.board.remove_task_entry(task_id);
            }
        }

        self.bump();
        Ok(())
    }

    /// Records the drag subject at gesture start
    ///
    /// Returns true if the id resolved to a task on the board. An
    /// unresolvable id clears the subject rather than leaving a stale
    /// one behind.
    pub fn drag_start(&mut self, dragged_id: &str) -> bool {
        self.drag_origin = None;
        let resolved = self.board.task(dragged_id).map(|task| task.id.clone());
        if resolved != self.active {
            self.active = resolved;
            self.version += 1;
        }
        self.active.is_some()
    }

    /// Live cross-column preview while the pointer moves
    ///
    /// Moves the dragged task into the column implied by `over_id` the
    /// moment the pointer crosses a column boundary: inserted
    /// immediately after `over_id` when it names a task in the
    /// destination, appended otherwise. Same-column hovers are a no-op
    /// here; that reorder waits for [`drag_end`](Self::drag_end) so the
    /// card is not reinserted at a shifting index on every pointer
    /// tick. Returns true if the board changed.
    pub fn drag_over(&mut self, dragged_id: &str, over_id: Option<&str>) -> bool {
        let Some(over_id) = over_id else {
            return false;
        };

        let Some(source) = self.board.column_of_task(dragged_id).cloned() else {
            return false;
        };
        let Some(target) = self.board.resolve_column(over_id) else {
            return false;
        };
        if source == target {
            return false;
        }

        let Some(task_id) = self.board.task(dragged_id).map(|task| task.id.clone()) else {
            return false;
        };

        // Dropping on a task inserts after it; dropping on the column
        // itself appends.
        let insert_at = if self.board.is_column(over_id) {
            None
        } else {
            self.board.column(target.as_str()).and_then(|dest| {
                dest.task_ids()
                    .iter()
                    .position(|t| t.as_str() == over_id)
                    .map(|index| index + 1)
            })
        };

        let removed = self
            .board
            .column_mut(&source)
            .is_some_and(|column| column.remove_task(&task_id));
        if !removed {
            return false;
        }

        if let Some(dest) = self.board.column_mut(&target) {
            match insert_at {
                Some(index) => dest.insert_task(index, task_id.clone()),
                None => dest.push_task(task_id.clone()),
            };
        }

        // Remember where this gesture first picked the task up.
        let already_tracked = self
            .drag_origin
            .as_ref()
            .is_some_and(|(task, _)| task == &task_id);
        if !already_tracked {
            self.drag_origin = Some((task_id, source));
        }

        self.bump();
        true
    }

    /// Finalizes the gesture and clears the drag subject
    ///
    /// Reorders within a column when source and target column coincide
    /// and the target names a task; cross-column placement was already
    /// committed by the last [`drag_over`](Self::drag_over). A release
    /// with no target only clears the subject — the board keeps
    /// whatever placement the hover stream produced. Returns true if
    /// the board changed.
    pub fn drag_end(&mut self, dragged_id: &str, over_id: Option<&str>) -> bool {
        let changed = self.reorder_on_drop(dragged_id, over_id);
        let cleared = self.active.take().is_some();
        self.drag_origin = None;
        if changed || cleared {
            self.version += 1;
        }
        debug_assert!(self.board.validate().is_ok());
        changed
    }

    fn reorder_on_drop(&mut self, dragged_id: &str, over_id: Option<&str>) -> bool {
        let Some(over_id) = over_id else {
            return false;
        };
        // Only a task target gives a drop index to reorder to.
        if self.board.is_column(over_id) {
            return false;
        }

        let Some(current) = self.board.column_of_task(dragged_id).cloned() else {
            return false;
        };
        let Some(target) = self.board.resolve_column(over_id) else {
            return false;
        };

        // The source is where the gesture picked the task up, not where
        // the live preview left it; a hover that crossed columns already
        // committed its placement and gets no extra reorder.
        let source = match &self.drag_origin {
            Some((task, origin)) if task.as_str() == dragged_id => origin.clone(),
            _ => current.clone(),
        };
        if source != target || current != target {
            return false;
        }

        let Some(column) = self.board.column(current.as_str()) else {
            return false;
        };
        let Some(from) = column.task_ids().iter().position(|t| t.as_str() == dragged_id) else {
            return false;
        };
        let Some(to) = column.task_ids().iter().position(|t| t.as_str() == over_id) else {
            return false;
        };
        if from == to {
            return false;
        }

        if let Some(column) = self.board.column_mut(&current) {
            column.move_task(from, to);
        }
        true
    }

    /// Bumps the version after a successful mutation
    fn bump(&mut self) {
        self.version += 1;
        debug_assert!(self.board.validate().is_ok());
    }

    fn fresh_task_id(&mut self, content: &str) -> TaskId {
        let mut id = self.ids.task_id(content);
        while self.board.task(id.as_str()).is_some() || self.board.column(id.as_str()).is_some() {
            id = self.ids.task_id(content);
        }
        id
    }

    fn fresh_column_id(&mut self, title: &str) -> ColumnId {
        let mut id = self.ids.column_id(title);
        while self.board.task(id.as_str()).is_some() || self.board.column(id.as_str()).is_some() {
            id = self.ids.column_id(title);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TaskId {
        s.parse().unwrap()
    }

    fn cid(s: &str) -> ColumnId {
        s.parse().unwrap()
    }

    /// Column A holds [t1, t2], column B holds [t3]
    fn two_column_engine() -> BoardEngine {
        let board = Board::from_parts(
            vec![
                Task::new(tid("t1"), "one", Priority::Medium),
                Task::new(tid("t2"), "two", Priority::Medium),
                Task::new(tid("t3"), "three", Priority::Medium),
            ],
            vec![
                Column::with_tasks(cid("A"), "Column A", vec![tid("t1"), tid("t2")]),
                Column::with_tasks(cid("B"), "Column B", vec![tid("t3")]),
            ],
        );
        BoardEngine::new(board).unwrap()
    }

    fn order_of<'a>(engine: &'a BoardEngine, column: &str) -> Vec<&'a str> {
        engine
            .board()
            .column(column)
            .unwrap()
            .task_ids()
            .iter()
            .map(|t| t.as_str())
            .collect()
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    #[test]
    fn add_task_defaults_to_end_of_first_column() {
        let mut engine = BoardEngine::sample();
        let id = engine.add_task("Buy milk", Priority::Low, None).unwrap();

        let first = engine.board().first_column().unwrap().clone();
        let column = engine.board().column(first.as_str()).unwrap();
        assert_eq!(column.task_ids().last(), Some(&id));
        assert_eq!(engine.board().task(id.as_str()).unwrap().content, "Buy milk");
    }

    #[test]
    fn add_task_targets_named_column() {
        let mut engine = BoardEngine::sample();
        let done = cid("column-3");
        let id = engine.add_task("Ship it", Priority::High, Some(&done)).unwrap();

        assert_eq!(engine.board().column_of_task(id.as_str()), Some(&done));
    }

    #[test]
    fn add_task_refuses_blank_content() {
        let mut engine = BoardEngine::sample();
        let before = engine.board().clone();

        assert_eq!(
            engine.add_task("   ", Priority::Low, None),
            Err(BoardError::InvalidInput)
        );
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn add_task_rejects_unknown_column() {
        let mut engine = BoardEngine::sample();
        let ghost = cid("column-99");

        assert_eq!(
            engine.add_task("Task", Priority::Low, Some(&ghost)),
            Err(BoardError::UnknownReference("column-99".to_string()))
        );
        assert_eq!(engine.board().task_count(), 5);
    }

    #[test]
    fn generated_ids_never_collide_with_board() {
        let mut engine = BoardEngine::sample();
        let a = engine.add_task("Same", Priority::Low, None).unwrap();
        let b = engine.add_task("Same", Priority::Low, None).unwrap();

        assert_ne!(a, b);
        assert_eq!(engine.board().validate(), Ok(()));
    }

    #[test]
    fn delete_task_is_idempotent_on_state() {
        let mut engine = BoardEngine::sample();
        engine.delete_task(&tid("task-1")).unwrap();
        let after_first = engine.board().clone();

        // Second delete reports the missing reference but changes nothing.
        assert_eq!(
            engine.delete_task(&tid("task-1")),
            Err(BoardError::UnknownReference("task-1".to_string()))
        );
        assert_eq!(engine.board(), &after_first);
        assert!(engine.board().task("task-1").is_none());
    }

    #[test]
    fn add_column_appends_to_order() {
        let mut engine = BoardEngine::sample();
        let id = engine.add_column("Blocked").unwrap();

        assert_eq!(engine.board().column_order().last(), Some(&id));
        assert!(engine.board().column(id.as_str()).unwrap().is_empty());
    }

    #[test]
    fn add_column_refuses_blank_title() {
        let mut engine = BoardEngine::sample();
        assert_eq!(engine.add_column("  "), Err(BoardError::InvalidInput));
        assert_eq!(engine.board().column_order().len(), 3);
    }

    #[test]
    fn delete_column_cascades_to_tasks() {
        let mut engine = two_column_engine();
        engine.delete_column(&cid("A")).unwrap();

        assert!(engine.board().column("A").is_none());
        assert!(engine.board().task("t1").is_none());
        assert!(engine.board().task("t2").is_none());
        assert_eq!(engine.board().task_count(), 1);
        assert_eq!(engine.board().column_order(), &[cid("B")]);
    }

    #[test]
    fn last_column_cannot_be_deleted() {
        let mut engine = two_column_engine();
        engine.delete_column(&cid("A")).unwrap();
        let before = engine.board().clone();

        assert_eq!(
            engine.delete_column(&cid("B")),
            Err(BoardError::LastColumnProtected)
        );
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn delete_unknown_column_is_reported() {
        let mut engine = BoardEngine::sample();
        assert_eq!(
            engine.delete_column(&cid("column-99")),
            Err(BoardError::UnknownReference("column-99".to_string()))
        );
    }

    // =========================================================================
    // Drag lifecycle
    // =========================================================================

    #[test]
    fn drag_start_records_subject() {
        let mut engine = BoardEngine::sample();
        assert!(engine.drag_start("task-1"));
        assert_eq!(engine.active_task().unwrap().id, tid("task-1"));
    }

    #[test]
    fn drag_start_with_unknown_id_clears_subject() {
        let mut engine = BoardEngine::sample();
        engine.drag_start("task-1");
        assert!(!engine.drag_start("task-99"));
        assert!(engine.active_task().is_none());
    }

    #[test]
    fn drag_over_moves_across_columns_after_target_task() {
        let mut engine = two_column_engine();

        // t3 lives in B, so hovering t1 over t3 moves it there, after t3.
        assert!(engine.drag_over("t1", Some("t3")));
        assert_eq!(order_of(&engine, "A"), vec!["t2"]);
        assert_eq!(order_of(&engine, "B"), vec!["t3", "t1"]);

        // The following drag_end sees differing source/target history
        // resolved already; B keeps its order.
        engine.drag_end("t1", Some("t3"));
        assert_eq!(order_of(&engine, "B"), vec!["t3", "t1"]);
    }

    #[test]
    fn drag_over_column_target_appends() {
        let mut engine = two_column_engine();

        assert!(engine.drag_over("t1", Some("B")));
        assert_eq!(order_of(&engine, "B"), vec!["t3", "t1"]);
    }

    #[test]
    fn drag_over_same_column_is_deferred() {
        let mut engine = two_column_engine();

        assert!(!engine.drag_over("t1", Some("t2")));
        assert_eq!(order_of(&engine, "A"), vec!["t1", "t2"]);
    }

    #[test]
    fn drag_over_tolerates_unresolvable_ids() {
        let mut engine = two_column_engine();
        let before = engine.board().clone();

        assert!(!engine.drag_over("ghost", Some("t3")));
        assert!(!engine.drag_over("t1", Some("ghost")));
        assert!(!engine.drag_over("t1", None));
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn redundant_hover_stream_is_stable() {
        let mut engine = two_column_engine();
        engine.drag_start("t1");

        assert!(engine.drag_over("t1", Some("t3")));
        // The pointer keeps reporting the same target; nothing moves.
        assert!(!engine.drag_over("t1", Some("t3")));
        assert!(!engine.drag_over("t1", Some("B")));
        assert_eq!(order_of(&engine, "B"), vec!["t3", "t1"]);
    }

    #[test]
    fn drag_end_reorders_within_column() {
        let mut engine = BoardEngine::sample();
        engine.drag_start("task-1");

        // column-1 = [task-1, task-2, task-3, task-4]
        assert!(engine.drag_end("task-1", Some("task-3")));
        let order: Vec<_> = engine
            .board()
            .column("column-1")
            .unwrap()
            .task_ids()
            .iter()
            .map(|t| t.as_str())
            .collect();
        assert_eq!(order, vec!["task-2", "task-3", "task-1", "task-4"]);
        assert!(engine.active_task().is_none());
    }

    #[test]
    fn drag_end_moves_to_front() {
        let mut engine = BoardEngine::sample();

        assert!(engine.drag_end("task-3", Some("task-1")));
        let order: Vec<_> = engine
            .board()
            .column("column-1")
            .unwrap()
            .task_ids()
            .iter()
            .map(|t| t.as_str())
            .collect();
        assert_eq!(order, vec!["task-3", "task-1", "task-2", "task-4"]);
    }

    #[test]
    fn drag_back_to_origin_column_reorders_on_drop() {
        let mut engine = two_column_engine();
        engine.drag_start("t1");

        // Out of A into B, then back into A: the origin and the final
        // target coincide again, so the drop index applies.
        assert!(engine.drag_over("t1", Some("t3")));
        assert!(engine.drag_over("t1", Some("t2")));
        assert_eq!(order_of(&engine, "A"), vec!["t2", "t1"]);

        assert!(engine.drag_end("t1", Some("t2")));
        assert_eq!(order_of(&engine, "A"), vec!["t1", "t2"]);
    }

    #[test]
    fn drag_end_without_target_only_clears_subject() {
        let mut engine = two_column_engine();
        engine.drag_start("t1");
        engine.drag_over("t1", Some("t3"));

        // Released over empty space: no rollback, placement sticks.
        assert!(!engine.drag_end("t1", None));
        assert!(engine.active_task().is_none());
        assert_eq!(order_of(&engine, "B"), vec!["t3", "t1"]);
    }

    #[test]
    fn drag_end_on_column_target_does_not_reorder() {
        let mut engine = two_column_engine();
        engine.drag_start("t1");

        assert!(!engine.drag_end("t1", Some("A")));
        assert_eq!(order_of(&engine, "A"), vec!["t1", "t2"]);
        assert!(engine.active_task().is_none());
    }

    #[test]
    fn drag_end_on_self_is_noop() {
        let mut engine = two_column_engine();
        assert!(!engine.drag_end("t1", Some("t1")));
        assert_eq!(order_of(&engine, "A"), vec!["t1", "t2"]);
    }

    #[test]
    fn drop_with_no_movement_is_tolerated() {
        let mut engine = two_column_engine();
        let before = engine.board().clone();

        engine.drag_start("t1");
        assert!(!engine.drag_end("t1", Some("t1")));
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn move_preserves_task_count() {
        let mut engine = two_column_engine();
        let before = engine.board().task_count();

        engine.drag_over("t1", Some("B"));
        engine.drag_end("t1", Some("t3"));

        assert_eq!(engine.board().task_count(), before);
        assert_eq!(engine.board().column_of_task("t1"), Some(&cid("B")));
        assert_eq!(engine.board().validate(), Ok(()));
    }

    #[test]
    fn deleting_dragged_task_drops_weak_reference() {
        let mut engine = BoardEngine::sample();
        engine.drag_start("task-1");
        engine.delete_task(&tid("task-1")).unwrap();

        // The weak reference no longer resolves.
        assert!(engine.active_task().is_none());
        assert_eq!(engine.board().validate(), Ok(()));
    }

    // =========================================================================
    // Versioning
    // =========================================================================

    #[test]
    fn version_moves_only_on_observable_change() {
        let mut engine = BoardEngine::sample();
        let v0 = engine.version();

        assert!(engine.add_task("", Priority::Low, None).is_err());
        assert_eq!(engine.version(), v0);

        engine.add_task("Buy milk", Priority::Low, None).unwrap();
        assert!(engine.version() > v0);

        let v1 = engine.version();
        assert!(!engine.drag_over("task-1", Some("task-2")));
        assert_eq!(engine.version(), v1);

        engine.drag_start("task-1");
        assert!(engine.version() > v1);
    }
}
