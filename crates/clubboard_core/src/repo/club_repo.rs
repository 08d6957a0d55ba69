//! Club snapshot repository and its SQLite implementation.
//!
//! # Invariants
//! - Attendance is keyed by `(match_id, player_id)`; writing an existing
//!   pair replaces its status.
//! - List ordering is deterministic (see each method).

use crate::db::DbError;
use crate::model::announcement::{AnnouncementKind, AnnouncementRecord};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::match_record::{MatchId, MatchRecord, MatchStatus};
use crate::model::player::{Member, PlayerMetric};
use crate::model::validation::RecordValidationError;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MATCH_SELECT_SQL: &str = "SELECT id, date, location, opponent, status FROM matches";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    MatchNotFound(MatchId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MatchNotFound(id) => write!(f, "match not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted club data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MatchNotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Source of club record snapshots.
pub trait ClubRepository {
    fn upsert_match(&self, record: &MatchRecord) -> RepoResult<()>;
    fn get_match(&self, id: MatchId) -> RepoResult<Option<MatchRecord>>;
    /// Ordered by `date, id`.
    fn list_matches(&self) -> RepoResult<Vec<MatchRecord>>;
    /// Also removes the match's attendance rows.
    fn delete_match(&self, id: MatchId) -> RepoResult<()>;

    fn upsert_announcement(&self, record: &AnnouncementRecord) -> RepoResult<()>;
    /// Ordered by `date, id`.
    fn list_announcements(&self) -> RepoResult<Vec<AnnouncementRecord>>;

    fn upsert_member(&self, member: &Member) -> RepoResult<()>;
    /// Ordered by `name, id`.
    fn list_members(&self) -> RepoResult<Vec<Member>>;

    fn upsert_player_metric(&self, metric: &PlayerMetric) -> RepoResult<()>;
    /// Ordered by `name, id`.
    fn list_player_metrics(&self) -> RepoResult<Vec<PlayerMetric>>;

    /// Inserts or replaces the answer for `(match_id, player_id)`.
    fn set_attendance(&self, record: &AttendanceRecord) -> RepoResult<()>;
    /// Ordered by `player_id`.
    fn list_attendance(&self, match_id: MatchId) -> RepoResult<Vec<AttendanceRecord>>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteClubRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClubRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn match_exists(&self, id: MatchId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM matches WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl ClubRepository for SqliteClubRepository<'_> {
    fn upsert_match(&self, record: &MatchRecord) -> RepoResult<()> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO matches (id, date, location, opponent, status)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                date = excluded.date,
                location = excluded.location,
                opponent = excluded.opponent,
                status = excluded.status,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.id,
                record.date.as_str(),
                record.location.as_str(),
                record.opponent.as_deref(),
                record.status.as_str(),
            ],
        )?;
        Ok(())
    }

    fn get_match(&self, id: MatchId) -> RepoResult<Option<MatchRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MATCH_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_match_row(row)?));
        }
        Ok(None)
    }

    fn list_matches(&self) -> RepoResult<Vec<MatchRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MATCH_SELECT_SQL} ORDER BY date ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut matches = Vec::new();
        while let Some(row) = rows.next()? {
            matches.push(parse_match_row(row)?);
        }
        Ok(matches)
    }

    fn delete_match(&self, id: MatchId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM matches WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::MatchNotFound(id));
        }
        Ok(())
    }

    fn upsert_announcement(&self, record: &AnnouncementRecord) -> RepoResult<()> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO announcements (id, type, date, title, attendance_tracking_enabled)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                type = excluded.type,
                date = excluded.date,
                title = excluded.title,
                attendance_tracking_enabled = excluded.attendance_tracking_enabled,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.id,
                record.kind.as_str(),
                record.date.as_str(),
                record.title.as_str(),
                record.attendance_tracking_enabled,
            ],
        )?;
        Ok(())
    }

    fn list_announcements(&self) -> RepoResult<Vec<AnnouncementRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, type, date, title, attendance_tracking_enabled
             FROM announcements
             ORDER BY date ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut announcements = Vec::new();
        while let Some(row) = rows.next()? {
            announcements.push(parse_announcement_row(row)?);
        }
        Ok(announcements)
    }

    fn upsert_member(&self, member: &Member) -> RepoResult<()> {
        member.validate()?;

        self.conn.execute(
            "INSERT INTO members (id, name, position)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                position = excluded.position;",
            params![
                member.id.as_str(),
                member.name.as_str(),
                member.position.as_deref()
            ],
        )?;
        Ok(())
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, position FROM members ORDER BY name ASC, id ASC;")?;
        let members = stmt
            .query_map([], |row| {
                Ok(Member {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    position: row.get("position")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(members)
    }

    fn upsert_player_metric(&self, metric: &PlayerMetric) -> RepoResult<()> {
        metric.validate()?;

        self.conn.execute(
            "INSERT INTO player_metrics (
                id, name, position, games, goals, assists, attendance_rate, clean_sheets
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                position = excluded.position,
                games = excluded.games,
                goals = excluded.goals,
                assists = excluded.assists,
                attendance_rate = excluded.attendance_rate,
                clean_sheets = excluded.clean_sheets;",
            params![
                metric.id.as_str(),
                metric.name.as_str(),
                metric.position.as_str(),
                metric.games,
                metric.goals,
                metric.assists,
                metric.attendance_rate,
                metric.clean_sheets,
            ],
        )?;
        Ok(())
    }

    fn list_player_metrics(&self) -> RepoResult<Vec<PlayerMetric>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, position, games, goals, assists, attendance_rate, clean_sheets
             FROM player_metrics
             ORDER BY name ASC, id ASC;",
        )?;
        let metrics = stmt
            .query_map([], |row| {
                Ok(PlayerMetric {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    position: row.get("position")?,
                    games: row.get("games")?,
                    goals: row.get("goals")?,
                    assists: row.get("assists")?,
                    attendance_rate: row.get("attendance_rate")?,
                    clean_sheets: row.get("clean_sheets")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(metrics)
    }

    fn set_attendance(&self, record: &AttendanceRecord) -> RepoResult<()> {
        record.validate()?;
        if !self.match_exists(record.match_id)? {
            return Err(RepoError::MatchNotFound(record.match_id));
        }

        self.conn.execute(
            "INSERT INTO attendance (match_id, player_id, status)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(match_id, player_id) DO UPDATE SET
                status = excluded.status,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.match_id,
                record.player_id.as_str(),
                record.status.as_str()
            ],
        )?;
        Ok(())
    }

    fn list_attendance(&self, match_id: MatchId) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT match_id, player_id, status
             FROM attendance
             WHERE match_id = ?1
             ORDER BY player_id ASC;",
        )?;
        let mut rows = stmt.query([match_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let status_text: String = row.get("status")?;
            let status = AttendanceStatus::parse(&status_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid attendance status `{status_text}` in attendance.status"
                ))
            })?;
            records.push(AttendanceRecord {
                match_id: row.get("match_id")?,
                player_id: row.get("player_id")?,
                status,
            });
        }
        Ok(records)
    }
}

fn parse_match_row(row: &Row<'_>) -> RepoResult<MatchRecord> {
    let status_text: String = row.get("status")?;
    let status = MatchStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid match status `{status_text}` in matches.status"))
    })?;

    Ok(MatchRecord {
        id: row.get("id")?,
        date: row.get("date")?,
        location: row.get("location")?,
        opponent: row.get("opponent")?,
        status,
    })
}

fn parse_announcement_row(row: &Row<'_>) -> RepoResult<AnnouncementRecord> {
    let type_text: String = row.get("type")?;
    let kind = AnnouncementKind::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid announcement type `{type_text}` in announcements.type"
        ))
    })?;

    Ok(AnnouncementRecord {
        id: row.get("id")?,
        kind,
        date: row.get("date")?,
        title: row.get("title")?,
        attendance_tracking_enabled: row.get("attendance_tracking_enabled")?,
    })
}

/// Returns the match with `id` or `RepoError::MatchNotFound`.
pub fn require_match<R: ClubRepository + ?Sized>(repo: &R, id: MatchId) -> RepoResult<MatchRecord> {
    repo.get_match(id)?.ok_or(RepoError::MatchNotFound(id))
}
