//! Sync provider contract.

use crate::model::board::{Board, BoardId};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

/// Callback invoked with each remote board snapshot.
pub type BoardListener = Box<dyn Fn(&Board) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("provider id is invalid: {0}")]
    InvalidProviderId(String),
    #[error("provider id already registered: {0}")]
    DuplicateProviderId(String),
    #[error("provider not found: {0}")]
    ProviderNotFound(String),
    #[error("no active sync provider selected")]
    ProviderNotSelected,
    #[error("provider `{provider_id}` failed: {message}")]
    Backend {
        provider_id: String,
        message: String,
    },
}

/// What a user is doing on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Viewing,
    Editing,
}

impl PresenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Viewing => "viewing",
            Self::Editing => "editing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    pub user_id: UserId,
    pub status: PresenceStatus,
}

/// Live board subscription.
///
/// Delivery stops on `unsubscribe()` or when the handle is dropped.
pub struct Subscription {
    board_id: BoardId,
    on_unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(board_id: BoardId, on_unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            board_id,
            on_unsubscribe: Some(Box::new(on_unsubscribe)),
        }
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(callback) = self.on_unsubscribe.take() {
            callback();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("board_id", &self.board_id)
            .field("active", &self.on_unsubscribe.is_some())
            .finish()
    }
}

/// Collaboration backend adapter.
pub trait SyncProvider: Send + Sync {
    /// Stable provider id (`[a-z0-9_-]+`).
    fn provider_id(&self) -> &str;
    /// Starts delivering remote snapshots of `board_id` to `listener`.
    fn subscribe_board(&self, board_id: BoardId, listener: BoardListener)
        -> SyncResult<Subscription>;
    /// Publishes the local state of one board.
    fn push_board_update(&self, board: &Board) -> SyncResult<()>;
    /// Lists users currently present on a board.
    fn user_presence(&self, board_id: BoardId) -> SyncResult<Vec<PresenceEntry>>;
    /// Announces what `user_id` is doing on `board_id`.
    fn set_user_presence(
        &self,
        board_id: BoardId,
        user_id: UserId,
        status: PresenceStatus,
    ) -> SyncResult<()>;
}
