//! Roster member and per-season player metric models.
//!
//! # Invariants
//! - `PlayerMetric::attendance_rate` is a percentage within `0..=100`.
//! - Metrics are produced externally; this crate only ranks them.

use crate::model::validation::{require_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Club roster entry used for attendance partitioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: None,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("member", "id", &self.id)
    }
}

/// Season totals for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetric {
    pub id: String,
    pub name: String,
    pub position: String,
    pub games: u32,
    pub goals: u32,
    pub assists: u32,
    /// Percentage of club matches attended.
    pub attendance_rate: f64,
    pub clean_sheets: u32,
}

impl PlayerMetric {
    /// Creates a metric row with every counter at zero.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            games: 0,
            goals: 0,
            assists: 0,
            attendance_rate: 0.0,
            clean_sheets: 0,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("player_metric", "id", &self.id)?;
        if !self.attendance_rate.is_finite() || !(0.0..=100.0).contains(&self.attendance_rate) {
            return Err(RecordValidationError::AttendanceRateOutOfRange(
                self.attendance_rate,
            ));
        }
        Ok(())
    }
}
