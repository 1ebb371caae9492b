//! Accolade repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{error::AppResult, models::Accolade};

/// Repository for accolade database operations
pub struct AccoladeRepository;

impl AccoladeRepository {
    /// Create an unassigned accolade template
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
        milestone_hours: i32,
    ) -> AppResult<Accolade> {
        let accolade = sqlx::query_as::<_, Accolade>(
            r#"
            INSERT INTO accolades (name, milestone_hours)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(milestone_hours)
        .fetch_one(executor)
        .await?;

        Ok(accolade)
    }

    /// Find accolade by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Accolade>> {
        let accolade = sqlx::query_as::<_, Accolade>(r#"SELECT * FROM accolades WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(accolade)
    }

    /// Link an unassigned accolade to a student.
    ///
    /// Returns `None` if the accolade was assigned in the meantime.
    pub async fn award<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        student_id: &Uuid,
    ) -> AppResult<Option<Accolade>> {
        let accolade = sqlx::query_as::<_, Accolade>(
            r#"
            UPDATE accolades
            SET student_id = $2, date_awarded = NOW()
            WHERE id = $1 AND student_id IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(student_id)
        .fetch_optional(executor)
        .await?;

        Ok(accolade)
    }

    /// Accolades awarded to a student, most recent first
    pub async fn list_for_student<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
    ) -> AppResult<Vec<Accolade>> {
        let accolades = sqlx::query_as::<_, Accolade>(
            r#"
            SELECT * FROM accolades
            WHERE student_id = $1
            ORDER BY date_awarded DESC, id
            "#,
        )
        .bind(student_id)
        .fetch_all(executor)
        .await?;

        Ok(accolades)
    }

    /// Every accolade, templates and awarded
    pub async fn list_all<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<Accolade>> {
        let accolades = sqlx::query_as::<_, Accolade>(
            r#"SELECT * FROM accolades ORDER BY milestone_hours, name, id"#,
        )
        .fetch_all(executor)
        .await?;

        Ok(accolades)
    }

    /// Delete an accolade
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM accolades WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
