//! Real-time sync boundary.
//!
//! # Responsibility
//! - Define the provider contract a collaboration backend implements.
//! - Route calls to the selected provider without touching the stores.
//!
//! # Invariants
//! - Core logic never depends on provider behavior; the stores stay the
//!   source of truth.

pub mod noop;
pub mod provider;
pub mod registry;

pub use noop::NoopSyncProvider;
pub use provider::{
    BoardListener, PresenceEntry, PresenceStatus, Subscription, SyncError, SyncProvider,
    SyncResult,
};
pub use registry::SyncRegistry;
