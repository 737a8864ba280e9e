//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and query calls into screen-level APIs.
//! - Keep FFI/CLI layers decoupled from how views are derived.

pub mod dashboard;
pub mod wellness_service;
