use clubboard_core::db::open_db_in_memory;
use clubboard_core::{
    AnnouncementKind, AnnouncementRecord, AttendanceRecord, AttendanceStatus, ClubRepository,
    MatchRecord, MatchStatus, Member, PlayerMetric, RecordValidationError, RepoError,
    SqliteClubRepository,
};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

#[test]
fn upsert_match_inserts_then_replaces() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);

    let original = MatchRecord::new(1, "2024-03-10T19:00:00", "Riverside Pitch");
    repo.upsert_match(&original).unwrap();

    let updated = original
        .clone()
        .with_opponent("FC Harbor")
        .with_status(MatchStatus::Completed);
    repo.upsert_match(&updated).unwrap();

    assert_eq!(repo.get_match(1).unwrap(), Some(updated));
    assert_eq!(repo.list_matches().unwrap().len(), 1);
}

#[test]
fn list_matches_orders_by_date_then_id() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);

    repo.upsert_match(&MatchRecord::new(3, "2024-03-17", "B")).unwrap();
    repo.upsert_match(&MatchRecord::new(2, "2024-03-10", "A")).unwrap();
    repo.upsert_match(&MatchRecord::new(1, "2024-03-17", "C")).unwrap();

    let ids = repo
        .list_matches()
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn set_attendance_replaces_answer_for_same_pair() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);
    repo.upsert_match(&MatchRecord::new(1, "2024-03-10", "Gym")).unwrap();

    repo.set_attendance(&AttendanceRecord::new(1, "p1", AttendanceStatus::Pending))
        .unwrap();
    repo.set_attendance(&AttendanceRecord::new(1, "p1", AttendanceStatus::Attending))
        .unwrap();
    repo.set_attendance(&AttendanceRecord::new(1, "p2", AttendanceStatus::NotAttending))
        .unwrap();

    let records = repo.list_attendance(1).unwrap();
    assert_eq!(
        records,
        vec![
            AttendanceRecord::new(1, "p1", AttendanceStatus::Attending),
            AttendanceRecord::new(1, "p2", AttendanceStatus::NotAttending),
        ]
    );
}

#[test]
fn set_attendance_for_unknown_match_is_not_found() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);

    let err = repo
        .set_attendance(&AttendanceRecord::new(77, "p1", AttendanceStatus::Attending))
        .unwrap_err();
    assert!(matches!(err, RepoError::MatchNotFound(77)));
}

#[test]
fn deleting_match_cascades_to_attendance() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);
    repo.upsert_match(&MatchRecord::new(1, "2024-03-10", "Gym")).unwrap();
    repo.set_attendance(&AttendanceRecord::new(1, "p1", AttendanceStatus::Attending))
        .unwrap();

    repo.delete_match(1).unwrap();

    assert!(repo.get_match(1).unwrap().is_none());
    assert!(repo.list_attendance(1).unwrap().is_empty());
}

#[test]
fn announcements_round_trip_kind_and_tracking_flag() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);

    let mut mirrored = AnnouncementRecord::notice(2, "2024-03-10", "Match day").with_tracking(true);
    mirrored.kind = AnnouncementKind::Match;
    let dinner = AnnouncementRecord::notice(1, "2024-03-12", "Team dinner").with_tracking(true);
    repo.upsert_announcement(&dinner).unwrap();
    repo.upsert_announcement(&mirrored).unwrap();

    assert_eq!(repo.list_announcements().unwrap(), vec![mirrored, dinner]);
}

#[test]
fn members_and_metrics_are_listed_by_name() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);

    repo.upsert_member(&Member::new("p2", "Yoon")).unwrap();
    let mut keeper = Member::new("p1", "Ahn");
    keeper.position = Some("GK".to_string());
    repo.upsert_member(&keeper).unwrap();

    let members = repo.list_members().unwrap();
    assert_eq!(members[0], keeper);
    assert_eq!(members[1].id, "p2");

    let mut metric = PlayerMetric::new("p1", "Ahn", "GK");
    metric.games = 10;
    metric.clean_sheets = 4;
    metric.attendance_rate = 92.5;
    repo.upsert_player_metric(&metric).unwrap();
    assert_eq!(repo.list_player_metrics().unwrap(), vec![metric]);
}

#[test]
fn write_paths_validate_records() {
    let conn = setup();
    let repo = SqliteClubRepository::new(&conn);

    let mut metric = PlayerMetric::new("p1", "Ahn", "GK");
    metric.attendance_rate = 120.0;
    let err = repo.upsert_player_metric(&metric).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::AttendanceRateOutOfRange(_))
    ));

    let err = repo.upsert_member(&Member::new(" ", "Nobody")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::BlankField {
            record: "member",
            field: "id"
        })
    ));
}

#[test]
fn unknown_persisted_status_is_invalid_data() {
    let conn = setup();
    conn.execute(
        "INSERT INTO matches (id, date, location, status) VALUES (1, '2024-03-10', 'Gym', 'postponed');",
        [],
    )
    .unwrap();
    let repo = SqliteClubRepository::new(&conn);

    let err = repo.list_matches().unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("postponed")),
        other => panic!("unexpected error: {other}"),
    }
}
