//! Core logic for the ClubBoard sports-club dashboard.
//! Derives calendar, leaderboard and attendance views from record snapshots.

pub mod db;
pub mod derive;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use derive::attendance::{summarize, summarize_for_match, AttendanceCounts, AttendanceSummary};
pub use derive::calendar::{aggregate, month_events, CalendarEvent, CalendarEventKind, CalendarMap};
pub use derive::date_key::{date_key, parse_local_date};
pub use derive::ranking::{rank, RankedPlayer, RankingMetric};
pub use derive::schedule::{partition_by_status, MatchBuckets};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::announcement::{AnnouncementId, AnnouncementKind, AnnouncementRecord};
pub use model::attendance::{AttendanceRecord, AttendanceStatus};
pub use model::match_record::{MatchId, MatchRecord, MatchStatus};
pub use model::player::{Member, PlayerMetric};
pub use model::validation::RecordValidationError;
pub use repo::club_repo::{ClubRepository, RepoError, RepoResult, SqliteClubRepository};
pub use repo::snapshot_import::{import_snapshot, ClubSnapshot, ImportCounts};
pub use service::dashboard_service::{
    DashboardService, DashboardServiceError, LeaderboardRow, MatchAttendance, MatchLists,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
