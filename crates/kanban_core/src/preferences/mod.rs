//! Device-local preference persistence.
//!
//! # Responsibility
//! - Store small string preferences under named keys.
//! - Expose the theme mode as the only persisted UI preference.
//!
//! # Invariants
//! - Values are opaque strings; interpretation belongs to the caller.
//! - `set` on an existing key replaces the previous value.

pub mod store;
pub mod theme;

pub use store::{
    MemoryPreferenceStore, PreferenceError, PreferenceResult, PreferenceStore,
    SqlitePreferenceStore,
};
pub use theme::{ThemeMode, ThemeParseError, ThemeService, THEME_PREFERENCE_KEY};
