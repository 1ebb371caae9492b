//! Accolade registry

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::MAX_ACCOLADE_NAME_LENGTH,
    db::repositories::{AccoladeRepository, StudentRepository},
    error::{AppError, AppResult},
    models::{Accolade, AwardOutcome, Identity},
    utils::sanitize_string,
};

/// Accolade service
pub struct AccoladeService;

impl AccoladeService {
    /// Create an unassigned accolade template (staff)
    pub async fn create_template(
        pool: &PgPool,
        identity: &Identity,
        name: &str,
        milestone_hours: i32,
    ) -> AppResult<Accolade> {
        identity.require_staff()?;

        let name = sanitize_string(name);
        if name.is_empty() {
            return Err(AppError::Validation("Accolade name is required".to_string()));
        }
        if name.chars().count() as u64 > MAX_ACCOLADE_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "Accolade name must be at most {} characters",
                MAX_ACCOLADE_NAME_LENGTH
            )));
        }
        if milestone_hours < 0 {
            return Err(AppError::Validation(
                "Milestone hours cannot be negative".to_string(),
            ));
        }

        let accolade = AccoladeRepository::create(pool, &name, milestone_hours).await?;

        info!(accolade_id = %accolade.id, name = %accolade.name, milestone_hours, "Accolade created");

        Ok(accolade)
    }

    /// Award an accolade to a student.
    ///
    /// Awarding to the current holder returns the accolade unchanged; an
    /// accolade held by someone else cannot be reassigned.
    pub async fn award(
        pool: &PgPool,
        identity: &Identity,
        accolade_id: &Uuid,
        student_id: &Uuid,
    ) -> AppResult<Accolade> {
        identity.require_staff()?;

        let mut tx = pool.begin().await?;
        let accolade = AccoladeRepository::find_by_id(&mut *tx, accolade_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Accolade not found".to_string()))?;
        StudentRepository::find(&mut *tx, student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        if accolade.award_outcome(*student_id)? == AwardOutcome::AlreadyHeld {
            return Ok(accolade);
        }

        let awarded = AccoladeRepository::award(&mut *tx, accolade_id, student_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState("Accolade was awarded concurrently".to_string())
            })?;
        StudentRepository::add_points(&mut *tx, student_id, i64::from(awarded.milestone_hours))
            .await?;
        tx.commit().await?;

        info!(
            accolade_id = %awarded.id,
            student_id = %student_id,
            staff_id = %identity.user_id,
            "Accolade awarded"
        );

        Ok(awarded)
    }

    /// Accolades awarded to a student
    pub async fn student_accolades(pool: &PgPool, student_id: &Uuid) -> AppResult<Vec<Accolade>> {
        AccoladeRepository::list_for_student(pool, student_id).await
    }

    /// Every accolade, awarded or not (staff)
    pub async fn list_all(pool: &PgPool, identity: &Identity) -> AppResult<Vec<Accolade>> {
        identity.require_staff()?;
        AccoladeRepository::list_all(pool).await
    }

    /// Delete an accolade (staff)
    pub async fn delete(pool: &PgPool, identity: &Identity, accolade_id: &Uuid) -> AppResult<()> {
        identity.require_staff()?;

        if !AccoladeRepository::delete(pool, accolade_id).await? {
            return Err(AppError::NotFound("Accolade not found".to_string()));
        }

        info!(accolade_id = %accolade_id, staff_id = %identity.user_id, "Accolade deleted");

        Ok(())
    }
}
