//! Leaderboard models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Approved total for one student, as read from the ledger
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StudentTotal {
    pub student_id: Uuid,
    pub username: String,
    pub total_hours: f64,
    pub total_accolades: i64,
    pub registered_at: DateTime<Utc>,
}

/// Persisted leaderboard projection row.
///
/// Rebuilt from the ledger on every leaderboard view; never read back as a
/// source of totals.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub student_id: Uuid,
    pub rank: i32,
    pub total_hours: f64,
    pub total_accolades: i64,
    pub refreshed_at: DateTime<Utc>,
}
