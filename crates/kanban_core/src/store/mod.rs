//! In-memory state containers for boards and users.
//!
//! # Responsibility
//! - Own the board and user collections and their active selections.
//! - Route every mutation through id-addressed operations.
//!
//! # Invariants
//! - A failed mutation leaves the store unchanged.
//! - The active board/user is stored by id and resolved on every read.
//! - Stores never generate ids.

pub mod board_store;
pub mod user_store;

use crate::model::board::IntegrityViolation;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity family addressed by a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Board,
    Column,
    Task,
    User,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Board => "board",
            Self::Column => "column",
            Self::Task => "task",
            Self::User => "user",
        };
        f.write_str(name)
    }
}

/// Store mutation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: Uuid },
    #[error("index {index} out of range for column {column_id} (len {len})")]
    IndexOutOfRange {
        column_id: Uuid,
        index: usize,
        len: usize,
    },
    #[error("column {column_id} does not hold task {expected} at index {index}")]
    PositionMismatch {
        column_id: Uuid,
        index: usize,
        expected: Uuid,
    },
    #[error("board {board_id} breaks {} column reference rule(s)", .violations.len())]
    InconsistentBoard {
        board_id: Uuid,
        violations: Vec<IntegrityViolation>,
    },
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn already_exists(kind: EntityKind, id: Uuid) -> Self {
        Self::AlreadyExists { kind, id }
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::AlreadyExists { .. } => "already_exists",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::PositionMismatch { .. } => "position_mismatch",
            Self::InconsistentBoard { .. } => "inconsistent_board",
        }
    }
}
