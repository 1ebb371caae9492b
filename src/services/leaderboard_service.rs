//! Leaderboard builder

use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    db::repositories::{LeaderboardRepository, StudentRepository},
    error::AppResult,
    ledger::{LeaderboardRow, Milestone, milestone_progress, milestones_for, rank_students},
};

/// Leaderboard row as shown on the leaderboard pages
#[derive(Debug, Serialize)]
pub struct Standing {
    #[serde(flatten)]
    pub row: LeaderboardRow,
    pub milestones: Vec<Milestone>,
    pub milestone_progress: u8,
}

impl From<LeaderboardRow> for Standing {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            milestones: milestones_for(row.hours),
            milestone_progress: milestone_progress(row.hours),
            row,
        }
    }
}

/// Leaderboard service
pub struct LeaderboardService;

impl LeaderboardService {
    /// Rank every student by approved hours, computed from the ledger
    pub async fn build(pool: &PgPool) -> AppResult<Vec<LeaderboardRow>> {
        let totals = StudentRepository::approved_totals(pool).await?;
        Ok(rank_students(totals))
    }

    /// Build the leaderboard and rewrite the persisted projection from it
    pub async fn refresh(pool: &PgPool) -> AppResult<Vec<LeaderboardRow>> {
        let rows = Self::build(pool).await?;

        let mut tx = pool.begin().await?;
        let written = LeaderboardRepository::replace_all(&mut tx, &rows).await?;
        tx.commit().await?;

        debug!(entries = written, "Leaderboard projection refreshed");

        Ok(rows)
    }

    /// Refresh the projection and decorate each row with its milestones
    pub async fn standings(pool: &PgPool) -> AppResult<Vec<Standing>> {
        let rows = Self::refresh(pool).await?;
        Ok(rows.into_iter().map(Standing::from).collect())
    }
}
