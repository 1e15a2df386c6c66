//! Kanban domain model.
//!
//! # Responsibility
//! - Define the plain data shapes shared by stores, views and boundaries.
//! - Keep behavior limited to lookups and invariant checks on one value.
//!
//! # Invariants
//! - Every entity is identified by a caller-generated `Uuid`.
//! - A board owns its columns and tasks; columns reference tasks by id only.

pub mod board;
pub mod user;

use uuid::Uuid;

/// Generates a fresh random identifier for callers that create entities.
///
/// Stores never call this: ids always arrive pre-generated.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}
