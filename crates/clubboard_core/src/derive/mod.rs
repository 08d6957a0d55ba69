//! Pure view-model derivations over club record snapshots.
//!
//! # Responsibility
//! - Turn raw store snapshots into calendar buckets, leaderboards and
//!   attendance summaries.
//!
//! # Invariants
//! - Every function is synchronous, side-effect free (apart from `debug`
//!   logs) and never fails.
//! - Identical input yields structurally identical output.

pub mod attendance;
pub mod calendar;
pub mod date_key;
pub mod ranking;
pub mod schedule;
