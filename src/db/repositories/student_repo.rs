//! Student profile repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{StudentProfile, StudentTotal},
};

/// Repository for student profiles and ledger aggregates
pub struct StudentRepository;

impl StudentRepository {
    /// Find a student profile by user id
    pub async fn find<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
    ) -> AppResult<Option<StudentProfile>> {
        let profile =
            sqlx::query_as::<_, StudentProfile>(r#"SELECT * FROM students WHERE user_id = $1"#)
                .bind(student_id)
                .fetch_optional(executor)
                .await?;

        Ok(profile)
    }

    /// Lock a student profile row for the rest of the transaction
    pub async fn find_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
    ) -> AppResult<Option<StudentProfile>> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"SELECT * FROM students WHERE user_id = $1 FOR UPDATE"#,
        )
        .bind(student_id)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }

    /// Add (or with a negative delta, remove) confirmed hours on the profile
    pub async fn add_hours<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
        delta: f64,
    ) -> AppResult<StudentProfile> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"
            UPDATE students
            SET total_hours = GREATEST(total_hours + $2, 0)
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(delta)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    /// Add accolade points
    pub async fn add_points<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
        points: i64,
    ) -> AppResult<()> {
        sqlx::query(r#"UPDATE students SET points = points + $2 WHERE user_id = $1"#)
            .bind(student_id)
            .bind(points)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Approved total for one student, summed from the ledger
    pub async fn approved_total<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
    ) -> AppResult<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT
                COALESCE((SELECT SUM(hours) FROM logged_hours
                          WHERE student_id = $1 AND status = 'approved'), 0)::float8
              + COALESCE((SELECT SUM(hours_logged) FROM activities
                          WHERE student_id = $1 AND status = 'Confirmed'), 0)::float8
            "#,
        )
        .bind(student_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    /// Approved totals and accolade counts for every student, in registration order
    pub async fn approved_totals<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<StudentTotal>> {
        let totals = sqlx::query_as::<_, StudentTotal>(
            r#"
            SELECT
                s.user_id AS student_id,
                u.username,
                COALESCE((SELECT SUM(lh.hours) FROM logged_hours lh
                          WHERE lh.student_id = s.user_id AND lh.status = 'approved'), 0)::float8
              + COALESCE((SELECT SUM(a.hours_logged) FROM activities a
                          WHERE a.student_id = s.user_id AND a.status = 'Confirmed'), 0)::float8
                    AS total_hours,
                (SELECT COUNT(*) FROM accolades ac WHERE ac.student_id = s.user_id) AS total_accolades,
                u.created_at AS registered_at
            FROM students s
            JOIN users u ON u.id = s.user_id
            ORDER BY u.created_at, s.user_id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(totals)
    }
}
