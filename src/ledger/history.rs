//! Chronological replay of a student's ledger with milestone annotations

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::milestones::{Milestone, MilestoneTracker};
use crate::{
    models::{Activity, ActivityStatus, HoursRequest, LoggedHours},
    utils::activity_label,
};

/// Where a ledger entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    HoursLogged,
    Activity,
    Request,
}

/// One hour record attributable to a student
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub hours: f64,
    pub status: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the entry is approved/confirmed and adds to the total
    #[serde(skip)]
    pub counts: bool,
}

impl From<&LoggedHours> for LedgerEntry {
    fn from(lh: &LoggedHours) -> Self {
        Self {
            id: lh.id,
            kind: EntryKind::HoursLogged,
            hours: lh.hours,
            status: lh.status.as_str().to_string(),
            label: lh.activity.clone(),
            timestamp: lh.created_at,
            counts: lh.status.counts_toward_total(),
        }
    }
}

/// Requests never count themselves; approval produces a counting ledger row.
impl From<&HoursRequest> for LedgerEntry {
    fn from(r: &HoursRequest) -> Self {
        Self {
            id: r.id,
            kind: EntryKind::Request,
            hours: r.hours,
            status: r.status.as_str().to_string(),
            label: activity_label(r.activity.as_deref()),
            timestamp: r.created_at,
            counts: false,
        }
    }
}

impl From<&Activity> for LedgerEntry {
    fn from(a: &Activity) -> Self {
        Self {
            id: a.id,
            kind: EntryKind::Activity,
            hours: a.hours_logged,
            status: a.status.to_string(),
            label: a.description.clone(),
            timestamp: a.logged_at,
            counts: a.status == ActivityStatus::Confirmed,
        }
    }
}

/// A ledger entry annotated with the running approved total
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub cumulative_hours: f64,
    pub milestones_achieved: Vec<Milestone>,
}

/// Replay entries in ascending time order.
///
/// Only counting entries add to the running total. Each milestone is reported
/// on the first entry whose cumulative total reaches it and never again.
/// Entries sharing a timestamp are ordered by id.
pub fn replay(mut entries: Vec<LedgerEntry>) -> Vec<HistoryEntry> {
    entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    let mut tracker = MilestoneTracker::new();
    let mut cumulative = 0.0;

    entries
        .into_iter()
        .map(|entry| {
            let milestones_achieved = if entry.counts {
                cumulative += entry.hours;
                tracker.advance(cumulative)
            } else {
                Vec::new()
            };
            HistoryEntry {
                entry,
                cumulative_hours: cumulative,
                milestones_achieved,
            }
        })
        .collect()
}

/// Sum of counting entries
pub fn approved_total(entries: &[LedgerEntry]) -> f64 {
    entries.iter().filter(|e| e.counts).map(|e| e.hours).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(hours: f64, counts: bool, minutes: i64) -> LedgerEntry {
        entry_with_id(Uuid::new_v4(), hours, counts, minutes)
    }

    fn entry_with_id(id: Uuid, hours: f64, counts: bool, minutes: i64) -> LedgerEntry {
        let base = DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        LedgerEntry {
            id,
            kind: EntryKind::HoursLogged,
            hours,
            status: if counts { "approved" } else { "pending" }.to_string(),
            label: "Community Service".into(),
            timestamp: base + Duration::minutes(minutes),
            counts,
        }
    }

    fn crossed(history: &[HistoryEntry]) -> Vec<Vec<String>> {
        history
            .iter()
            .map(|h| h.milestones_achieved.iter().map(|m| m.label()).collect())
            .collect()
    }

    #[test]
    fn test_replay_accumulates_and_marks_crossings() {
        let history = replay(vec![
            entry(4.0, true, 0),
            entry(6.0, true, 10),
            entry(15.0, true, 20),
        ]);

        let cumulative: Vec<f64> = history.iter().map(|h| h.cumulative_hours).collect();
        assert_eq!(cumulative, vec![4.0, 10.0, 25.0]);
        assert_eq!(
            crossed(&history),
            vec![
                vec![],
                vec!["10 Hours Milestone".to_string()],
                vec!["25 Hours Milestone".to_string()],
            ]
        );
    }

    #[test]
    fn test_replay_sorts_by_time() {
        let history = replay(vec![
            entry(15.0, true, 20),
            entry(4.0, true, 0),
            entry(6.0, true, 10),
        ]);
        let hours: Vec<f64> = history.iter().map(|h| h.entry.hours).collect();
        assert_eq!(hours, vec![4.0, 6.0, 15.0]);
    }

    #[test]
    fn test_non_counting_entries_do_not_accumulate() {
        let history = replay(vec![
            entry(8.0, true, 0),
            entry(30.0, false, 5),
            entry(2.0, true, 10),
        ]);
        assert_eq!(history[1].cumulative_hours, 8.0);
        assert!(history[1].milestones_achieved.is_empty());
        assert_eq!(history[2].cumulative_hours, 10.0);
        assert_eq!(crossed(&history)[2], vec!["10 Hours Milestone".to_string()]);
    }

    #[test]
    fn test_ties_do_not_reemit_milestones() {
        let history = replay(vec![
            entry_with_id(Uuid::from_u128(2), 0.0, true, 0),
            entry_with_id(Uuid::from_u128(1), 10.0, true, 0),
            entry(0.0, true, 5),
        ]);
        assert_eq!(history[0].entry.id, Uuid::from_u128(1));
        assert_eq!(crossed(&history)[0], vec!["10 Hours Milestone".to_string()]);
        assert!(history[1].milestones_achieved.is_empty());
        assert!(history[2].milestones_achieved.is_empty());
    }

    #[test]
    fn test_same_timestamp_breaks_ties_by_id() {
        let history = replay(vec![
            entry_with_id(Uuid::from_u128(1), 0.0, true, 0),
            entry_with_id(Uuid::from_u128(2), 10.0, true, 0),
        ]);
        assert!(history[0].milestones_achieved.is_empty());
        assert_eq!(crossed(&history)[1], vec!["10 Hours Milestone".to_string()]);
    }

    #[test]
    fn test_single_entry_crossing_several_milestones() {
        let history = replay(vec![entry(55.0, true, 0)]);
        assert_eq!(
            crossed(&history)[0],
            vec![
                "10 Hours Milestone".to_string(),
                "25 Hours Milestone".to_string(),
                "50 Hours Milestone".to_string(),
            ]
        );
    }

    #[test]
    fn test_approved_total_ignores_pending() {
        let entries = vec![entry(3.5, true, 0), entry(7.0, false, 1), entry(1.5, true, 2)];
        assert_eq!(approved_total(&entries), 5.0);
    }
}
