//! Milestone evaluation over cumulative approved hours

use serde::Serialize;

use crate::constants::MILESTONE_THRESHOLDS;

/// A fixed cumulative-hours threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Milestone {
    pub hours: u32,
}

impl Milestone {
    pub fn label(&self) -> String {
        format!("{} Hours Milestone", self.hours)
    }
}

impl From<Milestone> for String {
    fn from(m: Milestone) -> Self {
        m.label()
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Number of thresholds at or below `hours`
fn reached_count(hours: f64) -> usize {
    MILESTONE_THRESHOLDS.partition_point(|&t| f64::from(t) <= hours)
}

/// Every milestone reached by a cumulative total, ascending
pub fn milestones_for(hours: f64) -> Vec<Milestone> {
    MILESTONE_THRESHOLDS[..reached_count(hours)]
        .iter()
        .map(|&hours| Milestone { hours })
        .collect()
}

/// The first milestone not yet reached, if any remain
pub fn next_milestone(hours: f64) -> Option<Milestone> {
    MILESTONE_THRESHOLDS
        .get(reached_count(hours))
        .map(|&hours| Milestone { hours })
}

/// Hours still missing before the next milestone
pub fn hours_to_next(hours: f64) -> Option<f64> {
    next_milestone(hours).map(|m| f64::from(m.hours) - hours)
}

/// Percent of the way from the previous milestone to the next one, 0..=100.
///
/// Past the last milestone the progress stays at 100.
pub fn milestone_progress(hours: f64) -> u8 {
    let reached = reached_count(hours);
    let Some(&next) = MILESTONE_THRESHOLDS.get(reached) else {
        return 100;
    };
    let floor = reached
        .checked_sub(1)
        .map(|i| f64::from(MILESTONE_THRESHOLDS[i]))
        .unwrap_or(0.0);
    let span = f64::from(next) - floor;
    let pct = ((hours.max(0.0) - floor) / span * 100.0).floor();
    pct.clamp(0.0, 100.0) as u8
}

/// Tracks which milestones have already been emitted while replaying a ledger.
#[derive(Debug, Default)]
pub struct MilestoneTracker {
    emitted: usize,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milestones newly crossed at `cumulative`; never repeats an earlier one
    pub fn advance(&mut self, cumulative: f64) -> Vec<Milestone> {
        let reached = reached_count(cumulative);
        if reached <= self.emitted {
            return Vec::new();
        }
        let crossed = MILESTONE_THRESHOLDS[self.emitted..reached]
            .iter()
            .map(|&hours| Milestone { hours })
            .collect();
        self.emitted = reached;
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ms: &[Milestone]) -> Vec<String> {
        ms.iter().map(Milestone::label).collect()
    }

    #[test]
    fn test_display_matches_label() {
        let milestone = Milestone { hours: 10 };
        assert_eq!(milestone.to_string(), "10 Hours Milestone");
        assert_eq!(milestone.to_string(), milestone.label());
        assert_eq!(String::from(milestone), "10 Hours Milestone");
    }

    #[test]
    fn test_milestones_are_thresholds_at_or_below_total() {
        assert!(milestones_for(0.0).is_empty());
        assert!(milestones_for(9.99).is_empty());
        assert_eq!(labels(&milestones_for(10.0)), vec!["10 Hours Milestone"]);
        assert_eq!(
            labels(&milestones_for(49.5)),
            vec!["10 Hours Milestone", "25 Hours Milestone"]
        );
        assert_eq!(milestones_for(100.0).len(), 4);
        assert_eq!(milestones_for(1_000.0).len(), 4);
    }

    #[test]
    fn test_milestones_ascending_without_duplicates() {
        let mut h = 0.0;
        while h <= 120.0 {
            let ms = milestones_for(h);
            assert!(ms.windows(2).all(|w| w[0] < w[1]));
            for m in &ms {
                assert!(f64::from(m.hours) <= h);
            }
            h += 0.5;
        }
    }

    #[test]
    fn test_next_milestone() {
        assert_eq!(next_milestone(0.0), Some(Milestone { hours: 10 }));
        assert_eq!(next_milestone(10.0), Some(Milestone { hours: 25 }));
        assert_eq!(next_milestone(99.0), Some(Milestone { hours: 100 }));
        assert_eq!(next_milestone(100.0), None);
        assert_eq!(hours_to_next(20.0), Some(5.0));
        assert_eq!(hours_to_next(150.0), None);
    }

    #[test]
    fn test_progress_within_band() {
        assert_eq!(milestone_progress(0.0), 0);
        assert_eq!(milestone_progress(5.0), 50);
        assert_eq!(milestone_progress(10.0), 0);
        assert_eq!(milestone_progress(17.5), 50);
        assert_eq!(milestone_progress(37.5), 50);
        assert_eq!(milestone_progress(99.0), 98);
        assert_eq!(milestone_progress(100.0), 100);
        assert_eq!(milestone_progress(240.0), 100);
    }

    #[test]
    fn test_tracker_emits_each_milestone_once() {
        let mut tracker = MilestoneTracker::new();
        assert!(tracker.advance(4.0).is_empty());
        assert_eq!(labels(&tracker.advance(10.0)), vec!["10 Hours Milestone"]);
        assert!(tracker.advance(10.0).is_empty());
        assert_eq!(
            labels(&tracker.advance(60.0)),
            vec!["25 Hours Milestone", "50 Hours Milestone"]
        );
        assert!(tracker.advance(60.0).is_empty());
    }

    #[test]
    fn test_milestone_serializes_as_label() {
        let json = serde_json::to_string(&Milestone { hours: 25 }).unwrap();
        assert_eq!(json, "\"25 Hours Milestone\"");
    }
}
