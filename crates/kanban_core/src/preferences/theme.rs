//! Light/dark theme preference.
//!
//! # Invariants
//! - The persisted value is exactly `"light"` or `"dark"`.
//! - The stored value is read once, in `ThemeService::load`.
//! - Every mode change is written back before it becomes visible.

use crate::preferences::store::{PreferenceResult, PreferenceStore};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Storage key of the theme preference.
pub const THEME_PREFERENCE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored or supplied text is not a known theme mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode `{0}`; expected light|dark")]
pub struct ThemeParseError(pub String);

impl FromStr for ThemeMode {
    type Err = ThemeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Owns the active theme mode and keeps it persisted.
pub struct ThemeService<S: PreferenceStore> {
    store: S,
    mode: ThemeMode,
}

impl<S: PreferenceStore> ThemeService<S> {
    /// Reads the stored mode once.
    ///
    /// Falls back to `system_hint` (the platform's light/dark signal, if any)
    /// when nothing valid is stored, then to `ThemeMode::Light`.
    ///
    /// # Errors
    /// - Returns storage errors from the underlying store.
    pub fn load(store: S, system_hint: Option<ThemeMode>) -> PreferenceResult<Self> {
        let stored = store.get(THEME_PREFERENCE_KEY)?;
        let mode = match stored.as_deref().map(ThemeMode::from_str) {
            Some(Ok(mode)) => mode,
            Some(Err(err)) => {
                warn!("event=theme_load module=preferences status=fallback reason={err}");
                system_hint.unwrap_or_default()
            }
            None => system_hint.unwrap_or_default(),
        };
        info!("event=theme_load module=preferences status=ok mode={mode}");
        Ok(Self { store, mode })
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Persists and activates `mode`.
    pub fn set_mode(&mut self, mode: ThemeMode) -> PreferenceResult<()> {
        self.store.set(THEME_PREFERENCE_KEY, mode.as_str())?;
        self.mode = mode;
        Ok(())
    }

    /// Flips between light and dark and returns the new mode.
    pub fn toggle(&mut self) -> PreferenceResult<ThemeMode> {
        let next = self.mode.toggled();
        self.set_mode(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::{ThemeMode, ThemeParseError};
    use std::str::FromStr;

    #[test]
    fn parses_only_exact_literals() {
        assert_eq!(ThemeMode::from_str("dark"), Ok(ThemeMode::Dark));
        assert_eq!(
            ThemeMode::from_str("Dark"),
            Err(ThemeParseError("Dark".to_string()))
        );
        assert!(ThemeMode::from_str("").is_err());
    }
}
