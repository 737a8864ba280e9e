//! Storage layer for the session's log collection.
//!
//! # Responsibility
//! - Own the canonical in-memory collection of logs.
//! - Enforce id uniqueness and creation-time validation.
//!
//! # Invariants
//! - Every write path validates through the `Log` constructors.
//! - Reads hand out owned snapshots, never references into storage.

pub mod log_store;
