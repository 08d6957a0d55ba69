//! Announcement record model.

use crate::model::validation::{require_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned announcement identifier.
pub type AnnouncementId = i64;

/// Announcement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementKind {
    /// General club notice (training, meeting, social event).
    Notice,
    /// Mirrors a scheduled match; the match itself is the calendar source.
    Match,
}

impl AnnouncementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Match => "match",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "notice" => Some(Self::Notice),
            "match" => Some(Self::Match),
            _ => None,
        }
    }
}

/// One club announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub id: AnnouncementId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub attendance_tracking_enabled: bool,
}

impl AnnouncementRecord {
    /// Creates a notice with attendance tracking disabled.
    pub fn notice(id: AnnouncementId, date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            kind: AnnouncementKind::Notice,
            date: date.into(),
            title: title.into(),
            attendance_tracking_enabled: false,
        }
    }

    /// Enables or disables attendance tracking.
    pub fn with_tracking(mut self, enabled: bool) -> Self {
        self.attendance_tracking_enabled = enabled;
        self
    }

    /// Whether this announcement contributes its own calendar event.
    ///
    /// Match announcements are skipped because the match record already
    /// produces an event for the same day.
    pub fn is_calendar_notice(&self) -> bool {
        self.attendance_tracking_enabled && self.kind != AnnouncementKind::Match
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("announcement", "date", &self.date)?;
        require_text("announcement", "title", &self.title)
    }
}
