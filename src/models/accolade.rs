//! Accolade model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Accolade database model.
///
/// Created as an unassigned template; `student_id` and `date_awarded` are set
/// together when it is awarded.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Accolade {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub name: String,
    pub milestone_hours: i32,
    pub date_awarded: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// What awarding an accolade to a student should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardOutcome {
    /// Template is unassigned: link it now
    Assign,
    /// Already held by this student: nothing to change
    AlreadyHeld,
}

impl Accolade {
    pub fn is_awarded(&self) -> bool {
        self.student_id.is_some()
    }

    /// Decide how an award to `student_id` applies to this accolade
    pub fn award_outcome(&self, student_id: Uuid) -> AppResult<AwardOutcome> {
        match self.student_id {
            None => Ok(AwardOutcome::Assign),
            Some(holder) if holder == student_id => Ok(AwardOutcome::AlreadyHeld),
            Some(_) => Err(AppError::InvalidState(format!(
                "Accolade '{}' has already been awarded to another student",
                self.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Accolade {
        Accolade {
            id: Uuid::new_v4(),
            student_id: None,
            name: "Bronze Volunteer".into(),
            milestone_hours: 10,
            date_awarded: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unassigned_template_is_assigned() {
        let accolade = template();
        assert!(!accolade.is_awarded());
        assert_eq!(
            accolade.award_outcome(Uuid::new_v4()).unwrap(),
            AwardOutcome::Assign
        );
    }

    #[test]
    fn test_reawarding_to_holder_is_idempotent() {
        let holder = Uuid::new_v4();
        let accolade = Accolade {
            student_id: Some(holder),
            date_awarded: Some(Utc::now()),
            ..template()
        };
        assert_eq!(
            accolade.award_outcome(holder).unwrap(),
            AwardOutcome::AlreadyHeld
        );
    }

    #[test]
    fn test_awarding_held_accolade_to_someone_else_fails() {
        let accolade = Accolade {
            student_id: Some(Uuid::new_v4()),
            date_awarded: Some(Utc::now()),
            ..template()
        };
        assert!(matches!(
            accolade.award_outcome(Uuid::new_v4()),
            Err(AppError::InvalidState(_))
        ));
    }
}
