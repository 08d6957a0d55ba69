//! Club record snapshots consumed by the derivation core.
//!
//! # Responsibility
//! - Define the record shapes fetched from the club data store.
//! - Keep wire naming stable (`snake_case`, `type` for kind fields).
//!
//! # Invariants
//! - Records are read-only snapshots; derivations never mutate them.
//! - `validate()` is enforced by store write paths, not by derivations.

pub mod announcement;
pub mod attendance;
pub mod match_record;
pub mod player;
pub mod validation;
