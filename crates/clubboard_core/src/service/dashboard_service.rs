//! Dashboard view-model service.
//!
//! # Responsibility
//! - Fetch a fresh snapshot per call and hand it to the derivation core.
//! - Return owned view-models so callers do not hold repository borrows.
//!
//! # Invariants
//! - Every call re-reads storage; no derived state is cached.
//! - Attendance writes never bypass repository validation.

use crate::derive::attendance::{summarize_for_match, AttendanceCounts};
use crate::derive::calendar::{aggregate, month_events, CalendarMap};
use crate::derive::ranking::{rank, RankingMetric};
use crate::derive::schedule::partition_by_status;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::match_record::{MatchId, MatchRecord};
use crate::model::player::Member;
use crate::repo::club_repo::{require_match, ClubRepository, RepoError};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for dashboard use-cases.
#[derive(Debug)]
pub enum DashboardServiceError {
    /// Target match does not exist.
    MatchNotFound(MatchId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for DashboardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MatchNotFound(id) => write!(f, "match not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::MatchNotFound(_) => None,
        }
    }
}

impl From<RepoError> for DashboardServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::MatchNotFound(id) => Self::MatchNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, DashboardServiceError>;

/// Owned leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub value_display: String,
}

/// Owned attendance view for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchAttendance {
    pub match_id: MatchId,
    pub attending: Vec<Member>,
    pub not_attending: Vec<Member>,
    pub pending: Vec<Member>,
    pub counts: AttendanceCounts,
}

/// Owned match lists per status tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MatchLists {
    pub upcoming: Vec<MatchRecord>,
    pub completed: Vec<MatchRecord>,
    pub cancelled: Vec<MatchRecord>,
}

/// Dashboard facade over a snapshot repository.
pub struct DashboardService<R: ClubRepository> {
    repo: R,
}

impl<R: ClubRepository> DashboardService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gives direct access to the underlying repository (imports, admin).
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Calendar buckets over every match and tracked notice.
    pub fn calendar(&self) -> ServiceResult<CalendarMap> {
        let started_at = Instant::now();
        let matches = self.repo.list_matches()?;
        let announcements = self.repo.list_announcements()?;
        let calendar = aggregate(&matches, &announcements);

        info!(
            "event=calendar_view module=service status=ok days={} duration_ms={}",
            calendar.len(),
            started_at.elapsed().as_millis()
        );
        Ok(calendar)
    }

    /// Calendar buckets for one month only.
    pub fn calendar_month(&self, year: i32, month: u32) -> ServiceResult<CalendarMap> {
        let calendar = self.calendar()?;
        Ok(month_events(&calendar, year, month))
    }

    /// Leaderboard ordered by `metric`.
    pub fn leaderboard(&self, metric: RankingMetric) -> ServiceResult<Vec<LeaderboardRow>> {
        let started_at = Instant::now();
        let players = self.repo.list_player_metrics()?;
        let rows = rank(&players, metric)
            .into_iter()
            .map(|ranked| LeaderboardRow {
                rank: ranked.rank,
                player_id: ranked.player.id.clone(),
                name: ranked.player.name.clone(),
                position: ranked.player.position.clone(),
                value_display: ranked.display,
            })
            .collect::<Vec<_>>();

        info!(
            "event=leaderboard_view module=service status=ok metric={} rows={} duration_ms={}",
            metric.as_str(),
            rows.len(),
            started_at.elapsed().as_millis()
        );
        Ok(rows)
    }

    /// Attendance partition of the roster for `match_id`.
    ///
    /// # Errors
    /// - `MatchNotFound` when the match does not exist.
    pub fn attendance_summary(&self, match_id: MatchId) -> ServiceResult<MatchAttendance> {
        let started_at = Instant::now();
        require_match(&self.repo, match_id)?;
        let roster = self.repo.list_members()?;
        let records = self.repo.list_attendance(match_id)?;

        let summary = summarize_for_match(match_id, &records, &roster);
        let owned = |members: Vec<&Member>| members.into_iter().cloned().collect::<Vec<_>>();
        let view = MatchAttendance {
            match_id,
            counts: summary.counts,
            attending: owned(summary.attending),
            not_attending: owned(summary.not_attending),
            pending: owned(summary.pending),
        };

        info!(
            "event=attendance_view module=service status=ok match_id={} roster={} duration_ms={}",
            match_id,
            view.counts.total(),
            started_at.elapsed().as_millis()
        );
        Ok(view)
    }

    /// Records one member's answer for `match_id`.
    ///
    /// # Errors
    /// - `MatchNotFound` when the match does not exist.
    /// - `Repo(Validation)` for a blank player id.
    pub fn set_attendance(
        &self,
        match_id: MatchId,
        player_id: impl Into<String>,
        status: AttendanceStatus,
    ) -> ServiceResult<()> {
        let record = AttendanceRecord::new(match_id, player_id, status);
        self.repo.set_attendance(&record)?;
        info!(
            "event=attendance_set module=service status=ok match_id={} answer={}",
            match_id,
            status.as_str()
        );
        Ok(())
    }

    /// Matches split by status, each tab ordered by date.
    pub fn match_lists(&self) -> ServiceResult<MatchLists> {
        let matches = self.repo.list_matches()?;
        let buckets = partition_by_status(&matches);
        let owned =
            |records: Vec<&MatchRecord>| records.into_iter().cloned().collect::<Vec<_>>();
        Ok(MatchLists {
            upcoming: owned(buckets.upcoming),
            completed: owned(buckets.completed),
            cancelled: owned(buckets.cancelled),
        })
    }
}
