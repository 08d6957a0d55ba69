//! Attendance summary for one match.
//!
//! # Invariants
//! - Every roster member lands in exactly one bucket, so bucket lengths sum
//!   to the roster length.
//! - Members without a record are `pending`.
//! - Bucket order follows roster order.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::match_record::MatchId;
use crate::model::player::Member;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Bucket sizes of an [`AttendanceSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttendanceCounts {
    pub attending: usize,
    pub not_attending: usize,
    pub pending: usize,
}

impl AttendanceCounts {
    pub fn total(&self) -> usize {
        self.attending + self.not_attending + self.pending
    }
}

/// Roster partitioned by attendance answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AttendanceSummary<'a> {
    pub attending: Vec<&'a Member>,
    pub not_attending: Vec<&'a Member>,
    pub pending: Vec<&'a Member>,
    pub counts: AttendanceCounts,
}

/// Partitions `roster` by the status found in `records`.
///
/// `records` are assumed to belong to a single match. Records for players
/// outside the roster are ignored; for duplicate player records the last
/// one wins.
pub fn summarize<'a>(records: &[AttendanceRecord], roster: &'a [Member]) -> AttendanceSummary<'a> {
    summarize_records(records.iter(), roster)
}

/// Same as [`summarize`], restricted to records of `match_id`.
pub fn summarize_for_match<'a>(
    match_id: MatchId,
    records: &[AttendanceRecord],
    roster: &'a [Member],
) -> AttendanceSummary<'a> {
    summarize_records(
        records.iter().filter(|record| record.match_id == match_id),
        roster,
    )
}

fn summarize_records<'r, 'a>(
    records: impl Iterator<Item = &'r AttendanceRecord>,
    roster: &'a [Member],
) -> AttendanceSummary<'a> {
    let answers = records
        .map(|record| (record.player_id.as_str(), record.status))
        .collect::<HashMap<_, _>>();

    let mut summary = AttendanceSummary::default();
    for member in roster {
        let status = answers
            .get(member.id.as_str())
            .copied()
            .unwrap_or_default();
        match status {
            AttendanceStatus::Attending => summary.attending.push(member),
            AttendanceStatus::NotAttending => summary.not_attending.push(member),
            AttendanceStatus::Pending => summary.pending.push(member),
        }
    }

    summary.counts = AttendanceCounts {
        attending: summary.attending.len(),
        not_attending: summary.not_attending.len(),
        pending: summary.pending.len(),
    };
    debug!(
        "event=attendance_summarize module=derive status=ok roster={} answers={} attending={} not_attending={} pending={}",
        roster.len(),
        answers.len(),
        summary.counts.attending,
        summary.counts.not_attending,
        summary.counts.pending
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::{summarize, summarize_for_match, AttendanceCounts};
    use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::model::player::Member;

    fn roster() -> Vec<Member> {
        vec![
            Member::new("p1", "Kim"),
            Member::new("p2", "Lee"),
            Member::new("p3", "Park"),
        ]
    }

    fn ids(members: &[&Member]) -> Vec<String> {
        members.iter().map(|member| member.id.clone()).collect()
    }

    #[test]
    fn missing_record_defaults_to_pending() {
        let roster = roster();
        let records = vec![
            AttendanceRecord::new(1, "p1", AttendanceStatus::Attending),
            AttendanceRecord::new(1, "p2", AttendanceStatus::NotAttending),
        ];

        let summary = summarize(&records, &roster);
        assert_eq!(ids(&summary.attending), vec!["p1"]);
        assert_eq!(ids(&summary.not_attending), vec!["p2"]);
        assert_eq!(ids(&summary.pending), vec!["p3"]);
        assert_eq!(
            summary.counts,
            AttendanceCounts {
                attending: 1,
                not_attending: 1,
                pending: 1,
            }
        );
    }

    #[test]
    fn unknown_players_are_ignored_and_last_duplicate_wins() {
        let roster = roster();
        let records = vec![
            AttendanceRecord::new(1, "ghost", AttendanceStatus::Attending),
            AttendanceRecord::new(1, "p3", AttendanceStatus::Attending),
            AttendanceRecord::new(1, "p3", AttendanceStatus::NotAttending),
        ];

        let summary = summarize(&records, &roster);
        assert_eq!(summary.counts.total(), roster.len());
        assert_eq!(ids(&summary.not_attending), vec!["p3"]);
        assert!(summary.attending.is_empty());
    }

    #[test]
    fn match_filter_drops_other_matches() {
        let roster = roster();
        let records = vec![
            AttendanceRecord::new(1, "p1", AttendanceStatus::Attending),
            AttendanceRecord::new(2, "p2", AttendanceStatus::Attending),
        ];

        let summary = summarize_for_match(1, &records, &roster);
        assert_eq!(ids(&summary.attending), vec!["p1"]);
        assert_eq!(ids(&summary.pending), vec!["p2", "p3"]);
    }

    #[test]
    fn empty_roster_yields_empty_summary() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.counts.total(), 0);
    }
}
