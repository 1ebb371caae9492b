//! Activity log repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Activity, ActivityStatus},
};

/// Repository for activity log database operations
pub struct ActivityRepository;

impl ActivityRepository {
    /// Log a new pending activity
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
        hours_logged: f64,
        description: &str,
    ) -> AppResult<Activity> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (student_id, hours_logged, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(hours_logged)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(activity)
    }

    /// Find activity by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(r#"SELECT * FROM activities WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(activity)
    }

    /// Move an activity from `from` to `to`.
    ///
    /// Returns `None` when the activity is missing or no longer in `from`.
    /// `confirmed_at` is stamped when moving into `Confirmed`.
    pub async fn transition<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        from: ActivityStatus,
        to: ActivityStatus,
    ) -> AppResult<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET status = $3,
                confirmed_at = CASE WHEN $3 = 'Confirmed'::activity_status THEN NOW() ELSE NULL END
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(executor)
        .await?;

        Ok(activity)
    }

    /// A student's activities, newest first
    pub async fn list_for_student<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
    ) -> AppResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE student_id = $1
            ORDER BY logged_at DESC, id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(executor)
        .await?;

        Ok(activities)
    }

    /// Activities awaiting staff confirmation, oldest first
    pub async fn list_pending<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"SELECT * FROM activities WHERE status = 'Pending' ORDER BY logged_at, id"#,
        )
        .fetch_all(executor)
        .await?;

        Ok(activities)
    }
}
