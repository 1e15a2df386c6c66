//! Stub provider used until a real backend is configured.

use crate::model::board::{Board, BoardId};
use crate::model::user::UserId;
use crate::sync::provider::{
    BoardListener, PresenceEntry, PresenceStatus, Subscription, SyncProvider, SyncResult,
};
use log::info;

pub const NOOP_PROVIDER_ID: &str = "noop";

/// Accepts every call, logs it and never delivers remote data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSyncProvider;

impl NoopSyncProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SyncProvider for NoopSyncProvider {
    fn provider_id(&self) -> &str {
        NOOP_PROVIDER_ID
    }

    fn subscribe_board(
        &self,
        board_id: BoardId,
        _listener: BoardListener,
    ) -> SyncResult<Subscription> {
        info!("event=sync_subscribe module=sync status=ok provider=noop board_id={board_id}");
        Ok(Subscription::new(board_id, move || {
            info!("event=sync_unsubscribe module=sync status=ok provider=noop board_id={board_id}");
        }))
    }

    fn push_board_update(&self, board: &Board) -> SyncResult<()> {
        info!(
            "event=sync_push module=sync status=ok provider=noop board_id={} tasks={}",
            board.id,
            board.tasks.len()
        );
        Ok(())
    }

    fn user_presence(&self, board_id: BoardId) -> SyncResult<Vec<PresenceEntry>> {
        info!("event=sync_presence_get module=sync status=ok provider=noop board_id={board_id}");
        Ok(Vec::new())
    }

    fn set_user_presence(
        &self,
        board_id: BoardId,
        user_id: UserId,
        status: PresenceStatus,
    ) -> SyncResult<()> {
        info!(
            "event=sync_presence_set module=sync status=ok provider=noop board_id={board_id} user_id={user_id} presence={}",
            status.as_str()
        );
        Ok(())
    }
}
