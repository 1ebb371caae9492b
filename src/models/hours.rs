//! Hours request and logged hours models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Lifecycle of a student's hours request.
///
/// `Pending` moves exactly once, to `Approved` or `Denied`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

/// Staff decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Apply a staff decision, failing if the request was already resolved
    pub fn resolve(self, decision: Decision) -> AppResult<Self> {
        match self {
            Self::Pending => Ok(match decision {
                Decision::Approve => Self::Approved,
                Decision::Deny => Self::Denied,
            }),
            resolved => Err(AppError::InvalidState(format!(
                "Request already processed ({})",
                resolved
            ))),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Decision {
    pub fn target(&self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Deny => RequestStatus::Denied,
        }
    }
}

/// Hours request database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HoursRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hours: f64,
    pub activity: Option<String>,
    pub status: RequestStatus,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Pending request joined with the requesting student's name
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingRequest {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: HoursRequest,
    pub student_name: String,
}

/// Status of a ledger row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "logged_hours_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoggedHoursStatus {
    Pending,
    Approved,
}

impl LoggedHoursStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }

    pub fn counts_toward_total(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Logged hours (ledger row) database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LoggedHours {
    pub id: Uuid,
    pub student_id: Uuid,
    pub staff_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
    pub hours: f64,
    pub status: LoggedHoursStatus,
    pub activity: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_request_resolves_once() {
        let approved = RequestStatus::Pending.resolve(Decision::Approve).unwrap();
        assert_eq!(approved, RequestStatus::Approved);
        assert!(approved.is_terminal());

        let denied = RequestStatus::Pending.resolve(Decision::Deny).unwrap();
        assert_eq!(denied, RequestStatus::Denied);
    }

    #[test]
    fn test_resolved_request_rejects_second_decision() {
        for status in [RequestStatus::Approved, RequestStatus::Denied] {
            for decision in [Decision::Approve, Decision::Deny] {
                let err = status.resolve(decision).unwrap_err();
                assert!(matches!(err, AppError::InvalidState(_)));
            }
        }
    }

    #[test]
    fn test_only_approved_rows_count() {
        assert!(LoggedHoursStatus::Approved.counts_toward_total());
        assert!(!LoggedHoursStatus::Pending.counts_toward_total());
    }
}
