//! Preference store contract and implementations.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use thiserror::Error;

pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference key cannot be empty")]
    EmptyKey,
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for PreferenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value storage for device-local preferences.
pub trait PreferenceStore {
    /// Reads one value; `None` when the key was never written.
    fn get(&self, key: &str) -> PreferenceResult<Option<String>>;
    /// Writes one value, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()>;
}

/// Preferences kept in the `preferences` table of a migrated connection.
pub struct SqlitePreferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceStore for SqlitePreferenceStore<'_> {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        let key = validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()> {
        let key = validate_key(key)?;
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local preferences; nothing survives the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()> {
        let key = validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn validate_key(key: &str) -> PreferenceResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(PreferenceError::EmptyKey);
    }
    Ok(trimmed)
}
