//! User store: known users and the active user.
//!
//! # Invariants
//! - User ids are unique within the collection.
//! - `current_user()` is resolved by id lookup on every read.

use crate::model::user::{User, UserId};
use crate::store::{EntityKind, StoreError, StoreResult};
use log::{debug, warn};

/// Owned container for the users of one session.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<User>,
    current_user_id: Option<UserId>,
    loading: bool,
    last_error: Option<String>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    /// Replaces the whole collection. The active selection is kept by id.
    pub fn set_users(&mut self, users: Vec<User>) {
        debug!(
            "event=users_set module=store status=ok count={}",
            users.len()
        );
        self.users = users;
    }

    pub fn add_user(&mut self, user: User) -> StoreResult<()> {
        let user_id = user.id;
        let result = if self.user(user_id).is_some() {
            Err(StoreError::already_exists(EntityKind::User, user_id))
        } else {
            self.users.push(user);
            Ok(())
        };
        self.record("user_add", user_id, result)
    }

    /// Replaces the user with the same id.
    pub fn update_user(&mut self, user: User) -> StoreResult<()> {
        let user_id = user.id;
        let result = match self.users.iter_mut().find(|existing| existing.id == user_id) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(StoreError::not_found(EntityKind::User, user_id)),
        };
        self.record("user_update", user_id, result)
    }

    /// Removes a user; clears the active user when it was the removed one.
    pub fn remove_user(&mut self, user_id: UserId) -> StoreResult<()> {
        let before = self.users.len();
        self.users.retain(|user| user.id != user_id);
        let result = if self.users.len() == before {
            Err(StoreError::not_found(EntityKind::User, user_id))
        } else {
            if self.current_user_id == Some(user_id) {
                self.current_user_id = None;
            }
            Ok(())
        };
        self.record("user_remove", user_id, result)
    }

    /// Selects the active user by id. Unknown ids resolve to no active user.
    pub fn set_current_user(&mut self, user_id: Option<UserId>) {
        self.current_user_id = user_id;
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user_id
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user(self.current_user_id?)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn record(
        &mut self,
        event: &'static str,
        user_id: UserId,
        result: StoreResult<()>,
    ) -> StoreResult<()> {
        match &result {
            Ok(()) => {
                self.last_error = None;
                debug!("event={event} module=store status=ok user_id={user_id}");
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                warn!(
                    "event={event} module=store status=error user_id={user_id} error_code={} error={err}",
                    err.code()
                );
            }
        }
        result
    }
}
