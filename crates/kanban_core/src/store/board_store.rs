//! Board store: single source of truth for boards, columns and tasks.
//!
//! # Responsibility
//! - Own the board collection and the active-board selection.
//! - Apply board/column/task mutations while keeping column references valid.
//!
//! # Invariants
//! - Union of all columns' `task_ids` is a subset of `Board::tasks` keys.
//! - A task id appears in at most one column.
//! - Every mutation validates first and mutates second, so errors leave the
//!   store untouched.
//! - `current_board()` is resolved by id lookup; there is no cached copy.

use crate::model::board::{Board, BoardId, Column, ColumnId, Task, TaskId};
use crate::store::{EntityKind, StoreError, StoreResult};
use log::{debug, warn};
use std::collections::HashSet;

/// Drag-and-drop placement request.
///
/// `destination_index` is interpreted against the destination column after
/// the task has been removed from `source_index`, as an in-place splice would.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: TaskId,
    pub source_column_id: ColumnId,
    pub destination_column_id: ColumnId,
    pub source_index: usize,
    pub destination_index: usize,
}

/// Owned container for every board of one session.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    boards: Vec<Board>,
    current_board_id: Option<BoardId>,
    loading: bool,
    last_error: Option<String>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `boards` and no active board.
    pub fn with_boards(boards: Vec<Board>) -> Self {
        Self {
            boards,
            ..Self::default()
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, board_id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == board_id)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Replaces the whole collection. The active selection is kept by id.
    ///
    /// # Errors
    /// - `InconsistentBoard` for the first board breaking column references;
    ///   the collection is left unchanged.
    pub fn set_boards(&mut self, boards: Vec<Board>) -> StoreResult<()> {
        if let Some(err) = boards.iter().find_map(|board| check_board(board).err()) {
            self.last_error = Some(err.to_string());
            warn!(
                "event=boards_set module=store status=error error_code={} error={err}",
                err.code()
            );
            return Err(err);
        }
        debug!(
            "event=boards_set module=store status=ok count={}",
            boards.len()
        );
        self.boards = boards;
        self.last_error = None;
        Ok(())
    }

    /// Appends `board` without selecting it.
    ///
    /// # Errors
    /// - `AlreadyExists` when a board with the same id is present.
    /// - `InconsistentBoard` when a column references a missing or repeated task.
    pub fn add_board(&mut self, board: Board) -> StoreResult<()> {
        let board_id = board.id;
        let result = if self.board(board_id).is_some() {
            Err(StoreError::already_exists(EntityKind::Board, board_id))
        } else {
            check_board(&board).map(|()| self.boards.push(board))
        };
        self.record("board_add", board_id, result)
    }

    /// Selects the active board by id, or clears the selection with `None`.
    ///
    /// The id is not validated; an unknown id resolves to no active board.
    pub fn set_current_board(&mut self, board_id: Option<BoardId>) {
        self.current_board_id = board_id;
    }

    pub fn current_board_id(&self) -> Option<BoardId> {
        self.current_board_id
    }

    /// Resolves the active board against the current collection.
    pub fn current_board(&self) -> Option<&Board> {
        self.board(self.current_board_id?)
    }

    /// Replaces the board with the same id.
    ///
    /// # Errors
    /// - `NotFound` for an unknown board id.
    /// - `InconsistentBoard` when the replacement breaks column references.
    pub fn update_board(&mut self, board: Board) -> StoreResult<()> {
        let board_id = board.id;
        self.mutate_board("board_update", board_id, move |existing| {
            check_board(&board)?;
            *existing = board;
            Ok(())
        })
    }

    /// Removes a board with all its columns and tasks.
    ///
    /// Clears the active selection when it pointed at the removed board.
    pub fn delete_board(&mut self, board_id: BoardId) -> StoreResult<()> {
        let result = match self.boards.iter().position(|board| board.id == board_id) {
            Some(index) => {
                self.boards.remove(index);
                if self.current_board_id == Some(board_id) {
                    self.current_board_id = None;
                }
                Ok(())
            }
            None => Err(StoreError::not_found(EntityKind::Board, board_id)),
        };
        self.record("board_delete", board_id, result)
    }

    /// Appends `column` to the board's column sequence.
    pub fn add_column(&mut self, board_id: BoardId, column: Column) -> StoreResult<()> {
        self.mutate_board("column_add", board_id, move |board| {
            if board.column(column.id).is_some() {
                return Err(StoreError::already_exists(EntityKind::Column, column.id));
            }
            check_column_refs(board, &column)?;
            board.columns.push(column);
            Ok(())
        })
    }

    /// Replaces the column with the same id, keeping its position.
    pub fn update_column(&mut self, board_id: BoardId, column: Column) -> StoreResult<()> {
        self.mutate_board("column_update", board_id, move |board| {
            let index = board
                .columns
                .iter()
                .position(|existing| existing.id == column.id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Column, column.id))?;
            check_column_refs(board, &column)?;
            board.columns[index] = column;
            Ok(())
        })
    }

    /// Removes a column and cascade-deletes every task it referenced.
    pub fn delete_column(&mut self, board_id: BoardId, column_id: ColumnId) -> StoreResult<()> {
        self.mutate_board("column_delete", board_id, |board| {
            let index = board
                .columns
                .iter()
                .position(|column| column.id == column_id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Column, column_id))?;
            let removed = board.columns.remove(index);
            for task_id in &removed.task_ids {
                board.tasks.remove(task_id);
            }
            for column in &mut board.columns {
                column
                    .task_ids
                    .retain(|task_id| !removed.task_ids.contains(task_id));
            }
            Ok(())
        })
    }

    /// Inserts `task` into the board and appends its id to the column.
    ///
    /// # Errors
    /// - `NotFound` for an unknown board or column; the task is not inserted.
    /// - `AlreadyExists` when the board already holds a task with this id.
    pub fn add_task(
        &mut self,
        board_id: BoardId,
        column_id: ColumnId,
        task: Task,
    ) -> StoreResult<()> {
        self.mutate_board("task_add", board_id, move |board| {
            if board.tasks.contains_key(&task.id) {
                return Err(StoreError::already_exists(EntityKind::Task, task.id));
            }
            let column = board
                .column_mut(column_id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Column, column_id))?;
            column.task_ids.push(task.id);
            board.tasks.insert(task.id, task);
            Ok(())
        })
    }

    /// Replaces task content by id. Column placement is untouched.
    pub fn update_task(&mut self, board_id: BoardId, task: Task) -> StoreResult<()> {
        self.mutate_board("task_update", board_id, move |board| {
            let existing = board
                .tasks
                .get_mut(&task.id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Task, task.id))?;
            *existing = task;
            Ok(())
        })
    }

    /// Removes a task from the task map and from every column that lists it.
    pub fn delete_task(&mut self, board_id: BoardId, task_id: TaskId) -> StoreResult<()> {
        self.mutate_board("task_delete", board_id, |board| {
            let referenced = board.columns.iter().any(|column| column.contains(task_id));
            if !referenced && !board.tasks.contains_key(&task_id) {
                return Err(StoreError::not_found(EntityKind::Task, task_id));
            }
            for column in &mut board.columns {
                column.task_ids.retain(|id| *id != task_id);
            }
            board.tasks.remove(&task_id);
            Ok(())
        })
    }

    /// Moves a task within one column or across two columns.
    ///
    /// Removes the id at `source_index`, then inserts it at `destination_index`
    /// of the destination column as it stands after the removal.
    ///
    /// # Errors
    /// - `NotFound` for an unknown board, column or task.
    /// - `IndexOutOfRange` for an index outside the column.
    /// - `PositionMismatch` when `source_index` does not hold `task_id`.
    pub fn move_task(&mut self, board_id: BoardId, request: TaskMove) -> StoreResult<()> {
        self.mutate_board("task_move", board_id, |board| {
            let TaskMove {
                task_id,
                source_column_id,
                destination_column_id,
                source_index,
                destination_index,
            } = request;

            if !board.tasks.contains_key(&task_id) {
                return Err(StoreError::not_found(EntityKind::Task, task_id));
            }
            let source = board
                .column(source_column_id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Column, source_column_id))?;
            let destination = board.column(destination_column_id).ok_or_else(|| {
                StoreError::not_found(EntityKind::Column, destination_column_id)
            })?;

            match source.task_ids.get(source_index) {
                None => {
                    return Err(StoreError::IndexOutOfRange {
                        column_id: source_column_id,
                        index: source_index,
                        len: source.task_ids.len(),
                    })
                }
                Some(found) if *found != task_id => {
                    return Err(StoreError::PositionMismatch {
                        column_id: source_column_id,
                        index: source_index,
                        expected: task_id,
                    })
                }
                Some(_) => {}
            }

            let destination_len = if source_column_id == destination_column_id {
                destination.task_ids.len() - 1
            } else {
                destination.task_ids.len()
            };
            if destination_index > destination_len {
                return Err(StoreError::IndexOutOfRange {
                    column_id: destination_column_id,
                    index: destination_index,
                    len: destination_len,
                });
            }

            if let Some(source) = board.column_mut(source_column_id) {
                source.task_ids.remove(source_index);
            }
            if let Some(destination) = board.column_mut(destination_column_id) {
                destination.task_ids.insert(destination_index, task_id);
            }
            Ok(())
        })
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failed mutation, for display.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Overrides the error surface, e.g. with a sync failure.
    pub fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn mutate_board<F>(&mut self, event: &'static str, board_id: BoardId, op: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Board) -> StoreResult<()>,
    {
        let result = match self.boards.iter_mut().find(|board| board.id == board_id) {
            Some(board) => op(board),
            None => Err(StoreError::not_found(EntityKind::Board, board_id)),
        };
        self.record(event, board_id, result)
    }

    fn record(
        &mut self,
        event: &'static str,
        board_id: BoardId,
        result: StoreResult<()>,
    ) -> StoreResult<()> {
        match &result {
            Ok(()) => {
                self.last_error = None;
                debug!("event={event} module=store status=ok board_id={board_id}");
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                warn!(
                    "event={event} module=store status=error board_id={board_id} error_code={} error={err}",
                    err.code()
                );
            }
        }
        result
    }
}

fn check_board(board: &Board) -> StoreResult<()> {
    let violations = board.integrity_violations();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(StoreError::InconsistentBoard {
            board_id: board.id,
            violations,
        })
    }
}

/// Checks `column.task_ids` against the board, ignoring the column's own
/// current contents so an update may keep or reorder them.
fn check_column_refs(board: &Board, column: &Column) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for task_id in &column.task_ids {
        if !board.tasks.contains_key(task_id) {
            return Err(StoreError::not_found(EntityKind::Task, *task_id));
        }
        let held_elsewhere = board
            .columns
            .iter()
            .any(|other| other.id != column.id && other.contains(*task_id));
        if held_elsewhere || !seen.insert(*task_id) {
            return Err(StoreError::already_exists(EntityKind::Task, *task_id));
        }
    }
    Ok(())
}
