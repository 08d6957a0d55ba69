//! Calendar-event aggregation.
//!
//! # Responsibility
//! - Bucket matches and attendance-tracked notices by local calendar date.
//!
//! # Invariants
//! - Within one date bucket, match events precede notice events and each
//!   group keeps input order.
//! - Match announcements never produce an event of their own.
//! - Unrecognized dates are keyed by their raw string (see [`date_key`]).

use crate::derive::date_key::{date_key, DATE_KEY_FORMAT};
use crate::model::announcement::AnnouncementRecord;
use crate::model::match_record::{MatchRecord, MatchStatus};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Date key (`YYYY-MM-DD`) to the events of that day.
pub type CalendarMap = BTreeMap<String, Vec<CalendarEvent>>;

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventKind {
    Match,
    Notice,
}

/// One entry rendered on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    #[serde(rename = "type")]
    pub kind: CalendarEventKind,
    pub title: String,
    /// Set for match events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
    /// Id of the match or announcement this event came from.
    pub source_id: i64,
}

/// Groups matches and attendance-tracked notices by local date key.
pub fn aggregate(matches: &[MatchRecord], announcements: &[AnnouncementRecord]) -> CalendarMap {
    let mut calendar = CalendarMap::new();

    for record in matches {
        calendar
            .entry(date_key(&record.date))
            .or_default()
            .push(CalendarEvent {
                kind: CalendarEventKind::Match,
                title: record.title(),
                status: Some(record.status),
                source_id: record.id,
            });
    }

    let mut notices = 0usize;
    for record in announcements.iter().filter(|a| a.is_calendar_notice()) {
        notices += 1;
        calendar
            .entry(date_key(&record.date))
            .or_default()
            .push(CalendarEvent {
                kind: CalendarEventKind::Notice,
                title: record.title.clone(),
                status: None,
                source_id: record.id,
            });
    }

    debug!(
        "event=calendar_aggregate module=derive status=ok matches={} notices={} days={}",
        matches.len(),
        notices,
        calendar.len()
    );
    calendar
}

/// Returns the subset of `calendar` whose keys fall in `year`-`month`.
///
/// Raw pass-through keys never match a month, even when they share its prefix.
pub fn month_events(calendar: &CalendarMap, year: i32, month: u32) -> CalendarMap {
    let prefix = format!("{year:04}-{month:02}-");
    calendar
        .range(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
        .filter(|(key, _)| NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).is_ok())
        .map(|(key, events)| (key.clone(), events.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{aggregate, month_events, CalendarEventKind};
    use crate::model::announcement::{AnnouncementKind, AnnouncementRecord};
    use crate::model::match_record::{MatchRecord, MatchStatus};

    #[test]
    fn single_match_is_keyed_by_its_date() {
        let matches = vec![MatchRecord::new(1, "2024-03-10T19:00:00", "Riverside Pitch")];
        let calendar = aggregate(&matches, &[]);

        assert_eq!(calendar.len(), 1);
        let events = &calendar["2024-03-10"];
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CalendarEventKind::Match);
        assert_eq!(events[0].status, Some(MatchStatus::Upcoming));
    }

    #[test]
    fn matches_precede_notices_on_the_same_day() {
        let matches = vec![MatchRecord::new(7, "2024-03-10 10:00", "Gym").with_opponent("FC Blue")];
        let announcements = vec![
            AnnouncementRecord::notice(3, "2024-03-10", "Team dinner").with_tracking(true),
        ];
        let calendar = aggregate(&matches, &announcements);

        let events = &calendar["2024-03-10"];
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "vs FC Blue");
        assert_eq!(events[1].kind, CalendarEventKind::Notice);
        assert_eq!(events[1].status, None);
    }

    #[test]
    fn untracked_and_match_announcements_are_skipped() {
        let mut mirrored = AnnouncementRecord::notice(2, "2024-03-11", "Match day").with_tracking(true);
        mirrored.kind = AnnouncementKind::Match;
        let announcements = vec![
            AnnouncementRecord::notice(1, "2024-03-11", "Newsletter"),
            mirrored,
        ];

        assert!(aggregate(&[], &announcements).is_empty());
    }

    #[test]
    fn month_events_keeps_only_requested_month() {
        let matches = vec![
            MatchRecord::new(1, "2024-02-29", "A"),
            MatchRecord::new(2, "2024-03-01", "B"),
            MatchRecord::new(3, "2024-03-31", "C"),
            MatchRecord::new(4, "2024-04-01", "D"),
        ];
        let calendar = aggregate(&matches, &[]);
        let march = month_events(&calendar, 2024, 3);

        assert_eq!(
            march.keys().cloned().collect::<Vec<_>>(),
            vec!["2024-03-01".to_string(), "2024-03-31".to_string()]
        );
    }

    #[test]
    fn month_events_skips_raw_keys_sharing_the_prefix() {
        let matches = vec![
            MatchRecord::new(1, "2024-03-10 evening", "A"),
            MatchRecord::new(2, "2024-03-32", "B"),
            MatchRecord::new(3, "2024-03-15", "C"),
        ];
        let calendar = aggregate(&matches, &[]);
        assert!(calendar.contains_key("2024-03-32"));

        let march = month_events(&calendar, 2024, 3);
        assert_eq!(
            march.keys().cloned().collect::<Vec<_>>(),
            vec!["2024-03-15".to_string()]
        );
    }
}
