//! Attendance record model.
//!
//! # Invariants
//! - At most one record exists per `(match_id, player_id)`; the store enforces
//!   this with a composite unique key.
//! - A roster member without a record is treated as `Pending`.

use crate::model::match_record::MatchId;
use crate::model::validation::{require_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// A member's answer for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Attending,
    NotAttending,
    /// No answer yet. Also the implicit state when no record exists.
    #[default]
    Pending,
}

impl AttendanceStatus {
    /// Stable string id used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attending => "attending",
            Self::NotAttending => "not_attending",
            Self::Pending => "pending",
        }
    }

    /// Parses the stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "attending" => Some(Self::Attending),
            "not_attending" => Some(Self::NotAttending),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// One member's attendance answer for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub match_id: MatchId,
    pub player_id: String,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(match_id: MatchId, player_id: impl Into<String>, status: AttendanceStatus) -> Self {
        Self {
            match_id,
            player_id: player_id.into(),
            status,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("attendance", "player_id", &self.player_id)
    }
}
