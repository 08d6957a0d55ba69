//! Match record model.
//!
//! # Invariants
//! - `status` places a match in exactly one of three display buckets.
//! - `date` is kept as the raw store string; normalization happens at
//!   derivation time.

use crate::model::validation::{require_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned match identifier.
pub type MatchId = i64;

/// Lifecycle state of a scheduled match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Scheduled and not yet played.
    Upcoming,
    /// Played; stats may be recorded.
    Completed,
    /// Called off.
    Cancelled,
}

impl MatchStatus {
    /// Stable string id used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses the stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upcoming" => Some(Self::Upcoming),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// One scheduled match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    /// Plain date, ISO datetime or locale-formatted string.
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub opponent: Option<String>,
    pub status: MatchStatus,
}

impl MatchRecord {
    /// Creates an upcoming match without opponent.
    pub fn new(id: MatchId, date: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            location: location.into(),
            opponent: None,
            status: MatchStatus::Upcoming,
        }
    }

    /// Sets the opponent name.
    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = status;
        self
    }

    /// Display title: `vs <opponent>` when known, otherwise the location.
    pub fn title(&self) -> String {
        match self.opponent.as_deref().map(str::trim) {
            Some(opponent) if !opponent.is_empty() => format!("vs {opponent}"),
            _ => self.location.clone(),
        }
    }

    /// Checks that `date` and `location` are present.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("match", "date", &self.date)?;
        require_text("match", "location", &self.location)
    }
}
