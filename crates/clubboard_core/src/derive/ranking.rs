//! Leaderboard ranking.
//!
//! # Responsibility
//! - Order players by one season metric and assign competition ranks.
//!
//! # Invariants
//! - Equal values share a rank; the next distinct value is ranked
//!   `1 + number of players strictly ahead` (1, 1, 3).
//! - Sorting is stable, so equal values keep input order.
//! - Counting metrics exclude zero values; attendance rate includes everyone.

use crate::model::player::PlayerMetric;
use log::debug;
use serde::{Deserialize, Serialize};

/// Metric a leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    Goals,
    Assists,
    AttendanceRate,
    CleanSheets,
}

impl RankingMetric {
    /// All metrics in tab order.
    pub const ALL: [RankingMetric; 4] = [
        Self::Goals,
        Self::Assists,
        Self::AttendanceRate,
        Self::CleanSheets,
    ];

    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    /// Parses `snake_case` or `kebab-case` metric names.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        METRIC_TABLE
            .iter()
            .find(|spec| spec.name == normalized)
            .map(|spec| spec.metric)
    }

    /// Value used for ordering.
    pub fn value_of(self, player: &PlayerMetric) -> f64 {
        (self.spec().select)(player)
    }

    /// Whether `player` appears on this metric's leaderboard.
    pub fn includes(self, player: &PlayerMetric) -> bool {
        (self.spec().include)(self.value_of(player))
    }

    /// Human-readable value, e.g. `12` or `87.5%`.
    pub fn display(self, player: &PlayerMetric) -> String {
        (self.spec().format)(player)
    }

    fn spec(self) -> &'static MetricSpec {
        match self {
            Self::Goals => &METRIC_TABLE[0],
            Self::Assists => &METRIC_TABLE[1],
            Self::AttendanceRate => &METRIC_TABLE[2],
            Self::CleanSheets => &METRIC_TABLE[3],
        }
    }
}

struct MetricSpec {
    metric: RankingMetric,
    name: &'static str,
    select: fn(&PlayerMetric) -> f64,
    include: fn(f64) -> bool,
    format: fn(&PlayerMetric) -> String,
}

static METRIC_TABLE: [MetricSpec; 4] = [
    MetricSpec {
        metric: RankingMetric::Goals,
        name: "goals",
        select: |p: &PlayerMetric| f64::from(p.goals),
        include: positive,
        format: |p: &PlayerMetric| p.goals.to_string(),
    },
    MetricSpec {
        metric: RankingMetric::Assists,
        name: "assists",
        select: |p: &PlayerMetric| f64::from(p.assists),
        include: positive,
        format: |p: &PlayerMetric| p.assists.to_string(),
    },
    MetricSpec {
        metric: RankingMetric::AttendanceRate,
        name: "attendance_rate",
        select: |p: &PlayerMetric| p.attendance_rate,
        include: |_: f64| true,
        format: |p: &PlayerMetric| format!("{}%", (p.attendance_rate * 10.0).round() / 10.0),
    },
    MetricSpec {
        metric: RankingMetric::CleanSheets,
        name: "clean_sheets",
        select: |p: &PlayerMetric| f64::from(p.clean_sheets),
        include: positive,
        format: |p: &PlayerMetric| p.clean_sheets.to_string(),
    },
];

fn positive(value: f64) -> bool {
    value > 0.0
}

/// One leaderboard row borrowing the ranked player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer<'a> {
    pub rank: u32,
    pub value: f64,
    pub display: String,
    pub player: &'a PlayerMetric,
}

/// Ranks `players` by `metric` using competition ranking.
pub fn rank(players: &[PlayerMetric], metric: RankingMetric) -> Vec<RankedPlayer<'_>> {
    let mut scored = players
        .iter()
        .filter(|player| metric.includes(player))
        .map(|player| (metric.value_of(player), player))
        .collect::<Vec<_>>();
    scored.sort_by(|(left, _), (right, _)| right.total_cmp(left));

    let mut ranked = Vec::with_capacity(scored.len());
    let mut group: Option<(f64, u32)> = None;
    for (index, (value, player)) in scored.into_iter().enumerate() {
        let rank = match group {
            Some((group_value, group_rank)) if group_value.total_cmp(&value).is_eq() => group_rank,
            _ => {
                let first_position = index as u32 + 1;
                group = Some((value, first_position));
                first_position
            }
        };
        ranked.push(RankedPlayer {
            rank,
            value,
            display: metric.display(player),
            player,
        });
    }

    debug!(
        "event=leaderboard_rank module=derive status=ok metric={} players={} ranked={}",
        metric.as_str(),
        players.len(),
        ranked.len()
    );
    ranked
}
