//! Leaderboard projection repository

use sqlx::{PgConnection, PgExecutor};

use crate::{
    constants::LEADERBOARD_LOCK_KEY, error::AppResult, ledger::LeaderboardRow,
    models::LeaderboardEntry,
};

/// Repository for the persisted leaderboard projection
pub struct LeaderboardRepository;

impl LeaderboardRepository {
    /// Replace the whole projection with `rows`.
    ///
    /// Callers pass a transaction so readers never see a half-written board.
    /// Concurrent rewrites queue on a transaction-scoped advisory lock.
    pub async fn replace_all(conn: &mut PgConnection, rows: &[LeaderboardRow]) -> AppResult<u64> {
        sqlx::query(r#"SELECT pg_advisory_xact_lock($1)"#)
            .bind(LEADERBOARD_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        sqlx::query(r#"DELETE FROM leaderboard_entries"#)
            .execute(&mut *conn)
            .await?;

        let mut written = 0;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO leaderboard_entries (student_id, rank, total_hours, total_accolades)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.student_id)
            .bind(row.rank)
            .bind(row.hours)
            .bind(row.total_accolades)
            .execute(&mut *conn)
            .await?;
            written += 1;
        }

        Ok(written)
    }

    /// Read the projection back in rank order
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"SELECT * FROM leaderboard_entries ORDER BY rank"#,
        )
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }
}
