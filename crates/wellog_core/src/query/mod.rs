//! Read-side derivations over log snapshots.
//!
//! # Responsibility
//! - Filter logs by type tab and free-text search.
//! - Bucket logs by calendar date for the list view.
//!
//! # Invariants
//! - All functions are pure and total: empty input yields empty output.

pub mod filter;
pub mod group;
