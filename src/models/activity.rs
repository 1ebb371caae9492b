//! Activity log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Confirmation status of an activity log.
///
/// `Pending -> Confirmed | Rejected`. A rejected entry may be resubmitted
/// (back to `Pending`); a confirmed entry never leaves `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_status")]
pub enum ActivityStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Rejected => "Rejected",
        }
    }

    pub fn confirm(self) -> AppResult<Self> {
        match self {
            Self::Pending => Ok(Self::Confirmed),
            other => Err(AppError::InvalidState(format!(
                "Only pending activities can be confirmed (currently {})",
                other
            ))),
        }
    }

    pub fn reject(self) -> AppResult<Self> {
        match self {
            Self::Pending => Ok(Self::Rejected),
            other => Err(AppError::InvalidState(format!(
                "Only pending activities can be rejected (currently {})",
                other
            ))),
        }
    }

    /// Send a rejected entry back for another review
    pub fn resubmit(self) -> AppResult<Self> {
        match self {
            Self::Rejected => Ok(Self::Pending),
            Self::Pending => Err(AppError::InvalidState(
                "Activity is already awaiting confirmation".to_string(),
            )),
            Self::Confirmed => Err(AppError::InvalidState(
                "Confirmed activities cannot be resubmitted".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Activity log database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hours_logged: f64,
    pub status: ActivityStatus,
    pub description: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub logged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_happens_once() {
        let confirmed = ActivityStatus::Pending.confirm().unwrap();
        assert_eq!(confirmed, ActivityStatus::Confirmed);
        assert!(matches!(
            confirmed.confirm(),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_rejected_activity_can_be_resubmitted() {
        let rejected = ActivityStatus::Pending.reject().unwrap();
        assert_eq!(rejected.resubmit().unwrap(), ActivityStatus::Pending);
    }

    #[test]
    fn test_confirmed_activity_cannot_return_to_pending() {
        assert!(ActivityStatus::Confirmed.resubmit().is_err());
        assert!(ActivityStatus::Pending.resubmit().is_err());
        assert!(ActivityStatus::Confirmed.reject().is_err());
    }

    #[test]
    fn test_status_serializes_capitalized() {
        let json = serde_json::to_string(&ActivityStatus::Confirmed).unwrap();
        assert_eq!(json, "\"Confirmed\"");
    }
}
