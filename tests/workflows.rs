//! Database-backed workflow tests.
//!
//! These need a Postgres server: set `DATABASE_URL` and run
//! `cargo test -- --ignored`. Each test gets its own migrated database.

use sqlx::PgPool;

use service_hours::{
    AppError,
    db::repositories::{LeaderboardRepository, LoggedHoursRepository, StudentRepository},
    ledger::Milestone,
    models::{ActivityStatus, Identity, RequestStatus, Role},
    services::{
        AccoladeService, ActivityService, AuthService, HoursService, LeaderboardService,
        StudentService,
    },
};

async fn register(pool: &PgPool, username: &str, role: Role) -> Identity {
    let member = AuthService::register(
        pool,
        username,
        &format!("{}@school.test", username),
        "correct horse battery",
        role,
    )
    .await
    .expect("registration failed");
    Identity::new(member.user.id, role)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn approve_is_one_shot(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let request = HoursService::create_request(&pool, &student, 3.5, Some("Food bank"))
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let approval = HoursService::approve(&pool, &staff, &request.id).await.unwrap();
    assert_eq!(approval.request.status, RequestStatus::Approved);
    assert_eq!(approval.logged_hours.hours, 3.5);
    assert_eq!(approval.logged_hours.request_id, Some(request.id));

    let again = HoursService::approve(&pool, &staff, &request.id).await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));
    let denied = HoursService::deny(&pool, &staff, &request.id).await;
    assert!(matches!(denied, Err(AppError::InvalidState(_))));

    let rows = LoggedHoursRepository::count_for_request(&pool, &request.id)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let profile = StudentRepository::find(&pool, &student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.total_hours, 3.5);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deny_leaves_ledger_untouched(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let request = HoursService::create_request(&pool, &student, 2.0, None).await.unwrap();
    let denied = HoursService::deny(&pool, &staff, &request.id).await.unwrap();

    assert_eq!(denied.status, RequestStatus::Denied);
    assert_eq!(
        LoggedHoursRepository::count_for_request(&pool, &request.id)
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        HoursService::approved_total(&pool, &student.user_id).await.unwrap(),
        0.0
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unknown_request_is_not_found(pool: PgPool) {
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let result = HoursService::approve(&pool, &staff, &uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_username_or_email_is_rejected(pool: PgPool) {
    register(&pool, "maya", Role::Student).await;

    let same_username =
        AuthService::register(&pool, "maya", "other@school.test", "correct horse battery", Role::Student)
            .await;
    assert!(matches!(same_username, Err(AppError::DuplicateIdentity(_))));

    let same_email =
        AuthService::register(&pool, "maya_two", "maya@school.test", "correct horse battery", Role::Staff)
            .await;
    assert!(matches!(same_email, Err(AppError::DuplicateIdentity(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn awarded_accolade_becomes_visible(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let template = AccoladeService::create_template(&pool, &staff, "Helping Hand", 10)
        .await
        .unwrap();
    assert!(template.student_id.is_none());
    assert!(template.date_awarded.is_none());

    let before = AccoladeService::student_accolades(&pool, &student.user_id)
        .await
        .unwrap();
    assert!(before.is_empty());

    let awarded = AccoladeService::award(&pool, &staff, &template.id, &student.user_id)
        .await
        .unwrap();
    assert_eq!(awarded.student_id, Some(student.user_id));
    assert!(awarded.date_awarded.is_some());

    let after = AccoladeService::student_accolades(&pool, &student.user_id)
        .await
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, template.id);

    // Awarding again to the same student changes nothing.
    let repeat = AccoladeService::award(&pool, &staff, &template.id, &student.user_id)
        .await
        .unwrap();
    assert_eq!(repeat.date_awarded, awarded.date_awarded);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn awarded_accolade_cannot_be_reassigned(pool: PgPool) {
    let maya = register(&pool, "maya", Role::Student).await;
    let noah = register(&pool, "noah", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let template = AccoladeService::create_template(&pool, &staff, "Helping Hand", 10)
        .await
        .unwrap();
    AccoladeService::award(&pool, &staff, &template.id, &maya.user_id)
        .await
        .unwrap();

    let result = AccoladeService::award(&pool, &staff, &template.id, &noah.user_id).await;
    assert!(matches!(result, Err(AppError::InvalidState(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn leaderboard_orders_by_approved_hours(pool: PgPool) {
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;
    let leon = register(&pool, "leon", Role::Student).await;
    let zara = register(&pool, "zara", Role::Student).await;
    let omar = register(&pool, "omar", Role::Student).await;

    for (student, hours) in [(&zara, 10.0), (&omar, 5.0), (&leon, 1.0)] {
        HoursService::log_hours(&pool, &staff, &student.user_id, hours, None)
            .await
            .unwrap();
    }

    let rows = LeaderboardService::refresh(&pool).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["zara", "omar", "leon"]);
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), [1, 2, 3]);

    let projection = LeaderboardRepository::list(&pool).await.unwrap();
    assert_eq!(projection.len(), 3);
    assert_eq!(projection[0].student_id, zara.user_id);
    assert_eq!(projection[0].total_hours, 10.0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_leaderboard_views_all_succeed(pool: PgPool) {
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;
    for (name, hours) in [("leon", 1.0), ("zara", 10.0), ("omar", 5.0), ("ines", 7.5)] {
        let student = register(&pool, name, Role::Student).await;
        HoursService::log_hours(&pool, &staff, &student.user_id, hours, None)
            .await
            .unwrap();
    }

    let views: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { LeaderboardService::standings(&pool).await })
        })
        .collect();

    for view in views {
        let standings = view.await.expect("task panicked").expect("standings failed");
        assert_eq!(standings.len(), 4);
    }

    let projection = LeaderboardRepository::list(&pool).await.unwrap();
    assert_eq!(projection.len(), 4);
    assert_eq!(projection[0].total_hours, 10.0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn oversized_hours_are_rejected(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let request = HoursService::create_request(&pool, &student, 1e308, None).await;
    assert!(matches!(request, Err(AppError::Validation(_))));

    let log = HoursService::log_hours(&pool, &staff, &student.user_id, 1e308, None).await;
    assert!(matches!(log, Err(AppError::Validation(_))));

    let activity = ActivityService::log_activity(&pool, &student, 1e308, "Park cleanup").await;
    assert!(matches!(activity, Err(AppError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn history_marks_crossed_milestones(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    for hours in [4.0, 6.0, 15.0] {
        HoursService::log_hours(&pool, &staff, &student.user_id, hours, None)
            .await
            .unwrap();
    }

    let mut history = StudentService::history(&pool, &student.user_id).await.unwrap();
    history.reverse();

    let cumulative: Vec<f64> = history.iter().map(|h| h.cumulative_hours).collect();
    assert_eq!(cumulative, [4.0, 10.0, 25.0]);

    let crossed: Vec<Vec<Milestone>> = history
        .iter()
        .map(|h| h.milestones_achieved.clone())
        .collect();
    assert_eq!(
        crossed,
        [vec![], vec![Milestone { hours: 10 }], vec![Milestone { hours: 25 }]]
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn activity_confirmation_counts_once(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let activity = ActivityService::log_activity(&pool, &student, 2.0, "Park cleanup")
        .await
        .unwrap();
    assert_eq!(activity.status, ActivityStatus::Pending);

    let confirmed = ActivityService::confirm(&pool, &staff, &activity.id).await.unwrap();
    assert_eq!(confirmed.status, ActivityStatus::Confirmed);
    assert!(confirmed.confirmed_at.is_some());

    let again = ActivityService::confirm(&pool, &staff, &activity.id).await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));

    assert_eq!(
        HoursService::approved_total(&pool, &student.user_id).await.unwrap(),
        2.0
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rejected_activity_can_be_resubmitted(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let activity = ActivityService::log_activity(&pool, &student, 1.5, "Tutoring")
        .await
        .unwrap();
    ActivityService::reject(&pool, &staff, &activity.id).await.unwrap();

    let resubmitted = ActivityService::request_confirmation(&pool, &student, &activity.id)
        .await
        .unwrap();
    assert_eq!(resubmitted.status, ActivityStatus::Pending);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn students_only_withdraw_own_pending_requests(pool: PgPool) {
    let maya = register(&pool, "maya", Role::Student).await;
    let noah = register(&pool, "noah", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let request = HoursService::create_request(&pool, &maya, 1.0, None).await.unwrap();

    let foreign = HoursService::delete_request(&pool, &noah, &request.id).await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    HoursService::approve(&pool, &staff, &request.id).await.unwrap();
    let processed = HoursService::delete_request(&pool, &maya, &request.id).await;
    assert!(matches!(processed, Err(AppError::InvalidState(_))));

    HoursService::delete_request(&pool, &staff, &request.id).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_a_log_reverses_its_hours(pool: PgPool) {
    let student = register(&pool, "maya", Role::Student).await;
    let staff = register(&pool, "mr_ortiz", Role::Staff).await;

    let log = HoursService::log_hours(&pool, &staff, &student.user_id, 5.0, Some("Library"))
        .await
        .unwrap();
    HoursService::delete_log(&pool, &staff, &log.id).await.unwrap();

    let profile = StudentRepository::find(&pool, &student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.total_hours, 0.0);
    assert_eq!(
        HoursService::approved_total(&pool, &student.user_id).await.unwrap(),
        0.0
    );
}
