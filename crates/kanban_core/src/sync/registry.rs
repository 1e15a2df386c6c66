//! In-process sync provider registry and selection.

use crate::model::board::{Board, BoardId};
use crate::model::user::UserId;
use crate::sync::provider::{
    BoardListener, PresenceEntry, PresenceStatus, Subscription, SyncError, SyncProvider,
    SyncResult,
};
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered sync providers plus the one selected for routing.
#[derive(Default)]
pub struct SyncRegistry {
    providers: BTreeMap<String, Arc<dyn SyncProvider>>,
    active_provider_id: Option<String>,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one provider adapter.
    pub fn register(&mut self, provider: Arc<dyn SyncProvider>) -> SyncResult<()> {
        let provider_id = provider.provider_id().trim().to_string();
        if !is_valid_provider_id(&provider_id) {
            return Err(SyncError::InvalidProviderId(provider_id));
        }
        if self.providers.contains_key(provider_id.as_str()) {
            return Err(SyncError::DuplicateProviderId(provider_id));
        }

        info!("event=sync_register module=sync status=ok provider={provider_id}");
        self.providers.insert(provider_id, provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns sorted provider ids.
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn select_active(&mut self, provider_id: &str) -> SyncResult<()> {
        let normalized = provider_id.trim();
        if !self.providers.contains_key(normalized) {
            return Err(SyncError::ProviderNotFound(normalized.to_string()));
        }
        self.active_provider_id = Some(normalized.to_string());
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active_provider_id = None;
    }

    pub fn active_provider_id(&self) -> Option<&str> {
        self.active_provider_id.as_deref()
    }

    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn SyncProvider>> {
        self.providers.get(provider_id.trim()).cloned()
    }

    pub fn active_provider(&self) -> Option<Arc<dyn SyncProvider>> {
        let id = self.active_provider_id()?;
        self.get(id)
    }

    pub fn subscribe_board(
        &self,
        board_id: BoardId,
        listener: BoardListener,
    ) -> SyncResult<Subscription> {
        self.require_active()?.subscribe_board(board_id, listener)
    }

    pub fn push_board_update(&self, board: &Board) -> SyncResult<()> {
        self.require_active()?.push_board_update(board)
    }

    pub fn user_presence(&self, board_id: BoardId) -> SyncResult<Vec<PresenceEntry>> {
        self.require_active()?.user_presence(board_id)
    }

    pub fn set_user_presence(
        &self,
        board_id: BoardId,
        user_id: UserId,
        status: PresenceStatus,
    ) -> SyncResult<()> {
        self.require_active()?
            .set_user_presence(board_id, user_id, status)
    }

    fn require_active(&self) -> SyncResult<Arc<dyn SyncProvider>> {
        self.active_provider().ok_or(SyncError::ProviderNotSelected)
    }
}

fn is_valid_provider_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
