//! ClubBoard command-line entry point.
//!
//! # Responsibility
//! - Load club snapshots into the local store.
//! - Print derived dashboard views as JSON for scripting and quick checks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use clubboard_core::db::{open_db, open_db_in_memory};
use clubboard_core::{
    import_snapshot, AttendanceStatus, ClubSnapshot, DashboardService, RankingMetric,
    SqliteClubRepository,
};
use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "clubboard", version, about = "Sports club dashboard views")]
struct Cli {
    /// SQLite snapshot database; in-memory when omitted.
    #[arg(long, global = true, env = "CLUBBOARD_DB")]
    db: Option<PathBuf>,

    /// Absolute directory for rotated log files; logging is off when omitted.
    #[arg(long, global = true, env = "CLUBBOARD_LOG_DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "CLUBBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Verify core linkage.
    Ping,
    /// Load a JSON snapshot file into the database.
    Import { path: PathBuf },
    /// Print calendar buckets, optionally for one month (`YYYY-MM`).
    Calendar {
        #[arg(long)]
        month: Option<String>,
    },
    /// Print the leaderboard for one metric.
    Leaderboard {
        #[arg(long, value_parser = parse_metric, default_value = "goals")]
        metric: RankingMetric,
    },
    /// Print the attendance summary of one match.
    Attendance { match_id: i64 },
    /// Record one member's answer for a match.
    Attend {
        match_id: i64,
        player_id: String,
        #[arg(value_parser = parse_status)]
        status: AttendanceStatus,
    },
    /// Print matches grouped by status.
    Matches,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(clubboard_core::default_log_level());
        clubboard_core::init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let mut conn = open_connection(cli.db.as_deref(), cli.command.writes())?;

    match cli.command {
        Commands::Ping => {
            println!("clubboard_core ping={}", clubboard_core::ping());
            println!("clubboard_core version={}", clubboard_core::core_version());
        }
        Commands::Import { path } => {
            let counts = import_snapshot(&mut conn, &read_snapshot(&path)?)
                .with_context(|| format!("importing snapshot {}", path.display()))?;
            println!(
                "imported matches={} announcements={} members={} metrics={} attendance={}",
                counts.matches,
                counts.announcements,
                counts.members,
                counts.player_metrics,
                counts.attendance
            );
        }
        Commands::Calendar { month } => {
            let service = dashboard(&conn);
            let calendar = match month {
                Some(month) => {
                    let (year, month) = parse_month(&month)?;
                    service.calendar_month(year, month)?
                }
                None => service.calendar()?,
            };
            print_json(&calendar)?;
        }
        Commands::Leaderboard { metric } => print_json(&dashboard(&conn).leaderboard(metric)?)?,
        Commands::Attendance { match_id } => {
            print_json(&dashboard(&conn).attendance_summary(match_id)?)?
        }
        Commands::Attend {
            match_id,
            player_id,
            status,
        } => dashboard(&conn).set_attendance(match_id, player_id, status)?,
        Commands::Matches => print_json(&dashboard(&conn).match_lists()?)?,
    }

    Ok(())
}

impl Commands {
    /// Whether the command persists data and so needs a file database.
    fn writes(&self) -> bool {
        matches!(self, Self::Import { .. } | Self::Attend { .. })
    }
}

/// Opens the configured database; write commands refuse the in-memory fallback.
fn open_connection(db: Option<&Path>, writes: bool) -> Result<Connection> {
    match db {
        Some(path) => {
            open_db(path).with_context(|| format!("opening database {}", path.display()))
        }
        None if writes => {
            bail!("this command writes data; pass --db or set CLUBBOARD_DB")
        }
        None => open_db_in_memory().context("opening in-memory database"),
    }
}

fn dashboard(conn: &Connection) -> DashboardService<SqliteClubRepository<'_>> {
    DashboardService::new(SqliteClubRepository::new(conn))
}

fn read_snapshot(path: &Path) -> Result<ClubSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_month(value: &str) -> Result<(i32, u32)> {
    let Some((year, month)) = value.trim().split_once('-') else {
        bail!("month must look like YYYY-MM, got `{value}`");
    };
    let year = year.parse::<i32>().context("invalid year")?;
    let month = month.parse::<u32>().context("invalid month")?;
    if !(1..=12).contains(&month) {
        bail!("month must be within 1..=12, got {month}");
    }
    Ok((year, month))
}

fn parse_metric(value: &str) -> Result<RankingMetric, String> {
    RankingMetric::parse(value).ok_or_else(|| {
        format!("unknown metric `{value}`; expected goals|assists|attendance-rate|clean-sheets")
    })
}

fn parse_status(value: &str) -> Result<AttendanceStatus, String> {
    AttendanceStatus::parse(&value.trim().to_ascii_lowercase().replace('-', "_")).ok_or_else(|| {
        format!("unknown status `{value}`; expected attending|not-attending|pending")
    })
}
