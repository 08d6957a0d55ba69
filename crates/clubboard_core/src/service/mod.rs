//! Dashboard use-case services.
//!
//! # Responsibility
//! - Load repository snapshots and run the pure derivations over them.
//! - Keep CLI/UI callers decoupled from storage details.

pub mod dashboard_service;
