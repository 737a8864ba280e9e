//! Month calendar projection and day selection.
//!
//! # Responsibility
//! - Build Sunday-first month grids with per-day aggregates.
//! - Navigate months with calendar arithmetic.
//! - Track the selected day and answer "logs on that day".
//!
//! # Invariants
//! - Grids always contain whole weeks (cell count is a multiple of 7).
//! - Calendar aggregates ignore list-view filters.

pub mod grid;
pub mod selector;
pub mod view;
