//! Read-only projections over one board snapshot.
//!
//! # Invariants
//! - Views never mutate the board and never cache across calls.

pub mod board_stats;
