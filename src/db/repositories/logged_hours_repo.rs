//! Logged hours (ledger) repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{LoggedHours, LoggedHoursStatus},
};

/// Fields for a new ledger row
#[derive(Debug, Clone)]
pub struct NewLoggedHours<'a> {
    pub student_id: Uuid,
    pub staff_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
    pub hours: f64,
    pub status: LoggedHoursStatus,
    pub activity: &'a str,
}

/// Repository for logged hours database operations
pub struct LoggedHoursRepository;

impl LoggedHoursRepository {
    /// Insert a ledger row.
    ///
    /// `request_id` is unique, so a request can produce at most one row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        new: NewLoggedHours<'_>,
    ) -> AppResult<LoggedHours> {
        let row = sqlx::query_as::<_, LoggedHours>(
            r#"
            INSERT INTO logged_hours (student_id, staff_id, request_id, hours, status, activity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.student_id)
        .bind(new.staff_id)
        .bind(new.request_id)
        .bind(new.hours)
        .bind(new.status)
        .bind(new.activity)
        .fetch_one(executor)
        .await?;

        Ok(row)
    }

    /// Count ledger rows produced by a request
    pub async fn count_for_request<'e, E: PgExecutor<'e>>(
        executor: E,
        request_id: &Uuid,
    ) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM logged_hours WHERE request_id = $1"#)
                .bind(request_id)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }

    /// A student's ledger rows in chronological order
    pub async fn list_for_student<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
    ) -> AppResult<Vec<LoggedHours>> {
        let rows = sqlx::query_as::<_, LoggedHours>(
            r#"
            SELECT * FROM logged_hours
            WHERE student_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(student_id)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Delete a ledger row, returning it
    pub async fn delete<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<LoggedHours>> {
        let row = sqlx::query_as::<_, LoggedHours>(
            r#"DELETE FROM logged_hours WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(row)
    }
}
