//! Ranking students by approved hours

use serde::Serialize;
use uuid::Uuid;

use crate::models::StudentTotal;

/// One row of the ranked leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub rank: i32,
    pub student_id: Uuid,
    pub name: String,
    pub hours: f64,
    pub total_accolades: i64,
}

/// Rank students by approved total, highest first.
///
/// Ties keep registration order (then id), so the same ledger always yields
/// the same ranking. Ranks run 1..=N without gaps.
pub fn rank_students(mut totals: Vec<StudentTotal>) -> Vec<LeaderboardRow> {
    totals.sort_by(|a, b| {
        b.total_hours
            .total_cmp(&a.total_hours)
            .then_with(|| a.registered_at.cmp(&b.registered_at))
            .then_with(|| a.student_id.cmp(&b.student_id))
    });

    totals
        .into_iter()
        .zip(1..)
        .map(|(t, rank)| LeaderboardRow {
            rank,
            student_id: t.student_id,
            name: t.username,
            hours: t.total_hours,
            total_accolades: t.total_accolades,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn total(name: &str, hours: f64, registered_offset: i64) -> StudentTotal {
        StudentTotal {
            student_id: Uuid::new_v4(),
            username: name.to_string(),
            total_hours: hours,
            total_accolades: 0,
            registered_at: Utc::now() + Duration::seconds(registered_offset),
        }
    }

    fn names(rows: &[LeaderboardRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_orders_by_hours_descending() {
        let rows = rank_students(vec![
            total("leon", 1.0, 0),
            total("zara", 10.0, 1),
            total("omar", 5.0, 2),
        ]);
        assert_eq!(names(&rows), vec!["zara", "omar", "leon"]);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let rows = rank_students(vec![
            total("late", 7.0, 30),
            total("early", 7.0, 0),
            total("top", 9.0, 60),
        ]);
        assert_eq!(names(&rows), vec!["top", "early", "late"]);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(rank_students(Vec::new()).is_empty());
    }
}
