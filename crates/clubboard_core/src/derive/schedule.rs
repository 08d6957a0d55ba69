//! Match list buckets by status.

use crate::model::match_record::{MatchRecord, MatchStatus};
use serde::Serialize;

/// Matches split into the three status tabs, input order preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MatchBuckets<'a> {
    pub upcoming: Vec<&'a MatchRecord>,
    pub completed: Vec<&'a MatchRecord>,
    pub cancelled: Vec<&'a MatchRecord>,
}

impl MatchBuckets<'_> {
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.completed.len() + self.cancelled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Places every match in exactly one bucket according to its status.
pub fn partition_by_status(matches: &[MatchRecord]) -> MatchBuckets<'_> {
    let mut buckets = MatchBuckets::default();
    for record in matches {
        match record.status {
            MatchStatus::Upcoming => buckets.upcoming.push(record),
            MatchStatus::Completed => buckets.completed.push(record),
            MatchStatus::Cancelled => buckets.cancelled.push(record),
        }
    }
    buckets
}
