//! Hours request repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{HoursRequest, PendingRequest, RequestStatus},
};

/// Repository for hours request database operations
pub struct HoursRequestRepository;

impl HoursRequestRepository {
    /// Create a pending request
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
        hours: f64,
        activity: Option<&str>,
    ) -> AppResult<HoursRequest> {
        let request = sqlx::query_as::<_, HoursRequest>(
            r#"
            INSERT INTO hours_requests (student_id, hours, activity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(hours)
        .bind(activity)
        .fetch_one(executor)
        .await?;

        Ok(request)
    }

    /// Find request by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<HoursRequest>> {
        let request =
            sqlx::query_as::<_, HoursRequest>(r#"SELECT * FROM hours_requests WHERE id = $1"#)
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(request)
    }

    /// Move a request out of `pending`.
    ///
    /// The status check and the write are one statement, so of two concurrent
    /// resolutions only one gets a row back.
    pub async fn resolve<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        staff_id: &Uuid,
        status: RequestStatus,
    ) -> AppResult<Option<HoursRequest>> {
        let request = sqlx::query_as::<_, HoursRequest>(
            r#"
            UPDATE hours_requests
            SET status = $3, resolved_by = $2, resolved_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(staff_id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(request)
    }

    /// All pending requests with the requesting student's name, oldest first
    pub async fn list_pending<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<PendingRequest>> {
        let requests = sqlx::query_as::<_, PendingRequest>(
            r#"
            SELECT r.*, u.username AS student_name
            FROM hours_requests r
            JOIN users u ON u.id = r.student_id
            WHERE r.status = 'pending'
            ORDER BY r.created_at, r.id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(requests)
    }

    /// A student's requests, newest first
    pub async fn list_for_student<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<HoursRequest>> {
        let requests = sqlx::query_as::<_, HoursRequest>(
            r#"
            SELECT * FROM hours_requests
            WHERE student_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(requests)
    }

    /// Delete a request
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM hours_requests WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
