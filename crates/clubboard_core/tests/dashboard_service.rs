use clubboard_core::db::open_db_in_memory;
use clubboard_core::{
    AnnouncementRecord, AttendanceStatus, CalendarEventKind, ClubRepository, DashboardService,
    DashboardServiceError, MatchRecord, MatchStatus, Member, PlayerMetric, RankingMetric,
    RepoError, SqliteClubRepository,
};
use rusqlite::Connection;

fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteClubRepository::new(&conn);

    repo.upsert_match(
        &MatchRecord::new(1, "2024-03-10T19:00:00", "Riverside").with_opponent("FC Harbor"),
    )
    .unwrap();
    repo.upsert_match(
        &MatchRecord::new(2, "2024-04-02T10:00:00", "Gym").with_status(MatchStatus::Cancelled),
    )
    .unwrap();
    repo.upsert_announcement(
        &AnnouncementRecord::notice(10, "2024-03-10", "Kit collection").with_tracking(true),
    )
    .unwrap();

    for (id, name) in [("p1", "Ahn"), ("p2", "Baek"), ("p3", "Cho")] {
        repo.upsert_member(&Member::new(id, name)).unwrap();
    }

    let stats = [
        ("p1", "Ahn", 5, 92.0),
        ("p2", "Baek", 5, 75.0),
        ("p3", "Cho", 0, 40.0),
    ];
    for (id, name, goals, rate) in stats {
        let mut metric = PlayerMetric::new(id, name, "FW");
        metric.goals = goals;
        metric.attendance_rate = rate;
        repo.upsert_player_metric(&metric).unwrap();
    }

    conn
}

#[test]
fn calendar_merges_matches_and_tracked_notices() {
    let conn = seeded();
    let service = DashboardService::new(SqliteClubRepository::new(&conn));

    let calendar = service.calendar().unwrap();
    let day = &calendar["2024-03-10"];
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].kind, CalendarEventKind::Match);
    assert_eq!(day[0].title, "vs FC Harbor");
    assert_eq!(day[1].kind, CalendarEventKind::Notice);

    let april = service.calendar_month(2024, 4).unwrap();
    assert_eq!(april.len(), 1);
    assert_eq!(april["2024-04-02"][0].status, Some(MatchStatus::Cancelled));
}

#[test]
fn leaderboard_applies_competition_ranking_and_filter() {
    let conn = seeded();
    let service = DashboardService::new(SqliteClubRepository::new(&conn));

    let goals = service.leaderboard(RankingMetric::Goals).unwrap();
    let ranked = goals
        .iter()
        .map(|row| (row.player_id.as_str(), row.rank))
        .collect::<Vec<_>>();
    assert_eq!(ranked, vec![("p1", 1), ("p2", 1)]);

    let attendance = service.leaderboard(RankingMetric::AttendanceRate).unwrap();
    assert_eq!(attendance.len(), 3);
    assert_eq!(attendance[2].player_id, "p3");
    assert_eq!(attendance[2].rank, 3);
    assert_eq!(attendance[0].value_display, "92%");
}

#[test]
fn attendance_summary_defaults_to_pending() {
    let conn = seeded();
    let service = DashboardService::new(SqliteClubRepository::new(&conn));

    service
        .set_attendance(1, "p1", AttendanceStatus::Attending)
        .unwrap();
    service
        .set_attendance(1, "p2", AttendanceStatus::NotAttending)
        .unwrap();

    let view = service.attendance_summary(1).unwrap();
    assert_eq!(view.attending[0].id, "p1");
    assert_eq!(view.not_attending[0].id, "p2");
    assert_eq!(view.pending[0].id, "p3");
    assert_eq!(
        (view.counts.attending, view.counts.not_attending, view.counts.pending),
        (1, 1, 1)
    );
}

#[test]
fn attendance_for_unknown_match_is_match_not_found() {
    let conn = seeded();
    let service = DashboardService::new(SqliteClubRepository::new(&conn));

    assert!(matches!(
        service.attendance_summary(99).unwrap_err(),
        DashboardServiceError::MatchNotFound(99)
    ));
    assert!(matches!(
        service
            .set_attendance(99, "p1", AttendanceStatus::Attending)
            .unwrap_err(),
        DashboardServiceError::MatchNotFound(99)
    ));
    assert!(matches!(
        service
            .set_attendance(1, "  ", AttendanceStatus::Attending)
            .unwrap_err(),
        DashboardServiceError::Repo(RepoError::Validation(_))
    ));
}

#[test]
fn match_lists_split_by_status() {
    let conn = seeded();
    let service = DashboardService::new(SqliteClubRepository::new(&conn));

    let lists = service.match_lists().unwrap();
    assert_eq!(lists.upcoming.len(), 1);
    assert!(lists.completed.is_empty());
    assert_eq!(lists.cancelled[0].id, 2);
    assert_eq!(service.repo().list_matches().unwrap().len(), 2);
}
