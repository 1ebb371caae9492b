//! Hours ledger core
//!
//! Pure computations over approved hours: milestone evaluation, chronological
//! history replay and leaderboard ranking. Nothing here touches the database;
//! services load rows and hand them over.

pub mod history;
pub mod leaderboard;
pub mod milestones;

pub use history::{HistoryEntry, LedgerEntry, approved_total, replay};
pub use leaderboard::{LeaderboardRow, rank_students};
pub use milestones::{
    Milestone, MilestoneTracker, hours_to_next, milestone_progress, milestones_for, next_milestone,
};
