//! Snapshot repository contracts and SQLite persistence.
//!
//! # Responsibility
//! - Supply record snapshots to the dashboard service.
//! - Keep SQL inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation.
//! - Read paths reject unknown enum text instead of masking it.

pub mod club_repo;
pub mod snapshot_import;
