//! Domain model for wellness logs and their day-level projections.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep derived shapes (`DayBucket`, `TypeCounts`) separate from stored ones.
//!
//! # Invariants
//! - Every log is identified by a stable `LogId`.
//! - Derived shapes are recomputed from the store and never written back.

pub mod day;
pub mod log;
