//! Core state layer for the kanban board.
//! This crate is the single source of truth for board invariants.

pub mod analytics;
pub mod db;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod store;
pub mod sync;

pub use analytics::board_stats::{
    board_stats, board_stats_at, column_distribution, overdue_count, overdue_count_at,
    priority_distribution, upcoming_count, upcoming_count_at, BoardStats, DueDateBreakdown,
    PriorityCounts,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{
    Board, BoardId, Column, ColumnId, Comment, IntegrityViolation, Priority, Tag, TagId, Task,
    TaskId,
};
pub use model::new_id;
pub use model::user::{User, UserId, UserRole};
pub use preferences::{
    MemoryPreferenceStore, PreferenceError, PreferenceStore, SqlitePreferenceStore, ThemeMode,
    ThemeParseError, ThemeService,
};
pub use store::board_store::{BoardStore, TaskMove};
pub use store::user_store::UserStore;
pub use store::{EntityKind, StoreError, StoreResult};
pub use sync::{NoopSyncProvider, PresenceStatus, SyncError, SyncProvider, SyncRegistry};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
