//! Bulk snapshot import.
//!
//! # Invariants
//! - A snapshot is written in one IMMEDIATE transaction: either every record
//!   lands or none does.
//! - Attendance rows are written last so they can reference imported matches.

use crate::model::announcement::AnnouncementRecord;
use crate::model::attendance::AttendanceRecord;
use crate::model::match_record::MatchRecord;
use crate::model::player::{Member, PlayerMetric};
use crate::repo::club_repo::{ClubRepository, RepoResult, SqliteClubRepository};
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Snapshot file layout, one list per hosted table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubSnapshot {
    pub matches: Vec<MatchRecord>,
    pub announcements: Vec<AnnouncementRecord>,
    pub members: Vec<Member>,
    pub player_metrics: Vec<PlayerMetric>,
    pub attendance: Vec<AttendanceRecord>,
}

/// Row counts written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub matches: usize,
    pub announcements: usize,
    pub members: usize,
    pub player_metrics: usize,
    pub attendance: usize,
}

impl ClubSnapshot {
    pub fn counts(&self) -> ImportCounts {
        ImportCounts {
            matches: self.matches.len(),
            announcements: self.announcements.len(),
            members: self.members.len(),
            player_metrics: self.player_metrics.len(),
            attendance: self.attendance.len(),
        }
    }
}

/// Writes `snapshot` into the store atomically.
///
/// # Errors
/// - Any validation or SQL failure rolls back the whole snapshot.
pub fn import_snapshot(conn: &mut Connection, snapshot: &ClubSnapshot) -> RepoResult<ImportCounts> {
    let started_at = Instant::now();
    let result = write_snapshot(conn, snapshot);

    match &result {
        Ok(counts) => info!(
            "event=snapshot_import module=repo status=ok matches={} announcements={} members={} metrics={} attendance={} duration_ms={}",
            counts.matches,
            counts.announcements,
            counts.members,
            counts.player_metrics,
            counts.attendance,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=snapshot_import module=repo status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn write_snapshot(conn: &mut Connection, snapshot: &ClubSnapshot) -> RepoResult<ImportCounts> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    {
        let repo = SqliteClubRepository::new(&tx);
        for record in &snapshot.matches {
            repo.upsert_match(record)?;
        }
        for record in &snapshot.announcements {
            repo.upsert_announcement(record)?;
        }
        for member in &snapshot.members {
            repo.upsert_member(member)?;
        }
        for metric in &snapshot.player_metrics {
            repo.upsert_player_metric(metric)?;
        }
        for record in &snapshot.attendance {
            repo.set_attendance(record)?;
        }
    }
    tx.commit()?;
    Ok(snapshot.counts())
}
