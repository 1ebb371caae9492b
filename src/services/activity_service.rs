//! Activity log confirmation workflow

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::MAX_DESCRIPTION_LENGTH,
    db::repositories::{ActivityRepository, StudentRepository},
    error::{AppError, AppResult},
    models::{Activity, ActivityStatus, Identity},
    utils::{sanitize_string, validate_hours},
};

/// Activity log service
pub struct ActivityService;

impl ActivityService {
    /// Log an activity for the calling student; it starts out `Pending`
    pub async fn log_activity(
        pool: &PgPool,
        identity: &Identity,
        hours: f64,
        description: &str,
    ) -> AppResult<Activity> {
        identity.require_student()?;
        let hours = validate_hours(hours)?;
        let description = sanitize_string(description);
        if description.chars().count() as u64 > MAX_DESCRIPTION_LENGTH {
            return Err(AppError::Validation(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }

        StudentRepository::find(pool, &identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let activity =
            ActivityRepository::create(pool, &identity.user_id, hours, &description).await?;

        info!(activity_id = %activity.id, student_id = %activity.student_id, hours, "Activity logged");

        Ok(activity)
    }

    /// Confirm a pending activity and credit its hours exactly once
    pub async fn confirm(pool: &PgPool, identity: &Identity, activity_id: &Uuid) -> AppResult<Activity> {
        identity.require_staff()?;

        let mut tx = pool.begin().await?;
        let activity = match ActivityRepository::transition(
            &mut *tx,
            activity_id,
            ActivityStatus::Pending,
            ActivityStatus::Confirmed,
        )
        .await?
        {
            Some(activity) => activity,
            None => {
                let current = Self::find(&mut *tx, activity_id).await?;
                current.status.confirm()?;
                return Err(AppError::InvalidState("Activity is being processed".to_string()));
            }
        };
        StudentRepository::add_hours(&mut *tx, &activity.student_id, activity.hours_logged).await?;
        tx.commit().await?;

        info!(
            activity_id = %activity.id,
            student_id = %activity.student_id,
            staff_id = %identity.user_id,
            hours = activity.hours_logged,
            "Activity confirmed"
        );

        Ok(activity)
    }

    /// Reject a pending activity
    pub async fn reject(pool: &PgPool, identity: &Identity, activity_id: &Uuid) -> AppResult<Activity> {
        identity.require_staff()?;

        match ActivityRepository::transition(
            pool,
            activity_id,
            ActivityStatus::Pending,
            ActivityStatus::Rejected,
        )
        .await?
        {
            Some(activity) => {
                info!(
                    activity_id = %activity.id,
                    staff_id = %identity.user_id,
                    "Activity rejected"
                );
                Ok(activity)
            }
            None => {
                let current = Self::find(pool, activity_id).await?;
                current.status.reject()?;
                Err(AppError::InvalidState("Activity is being processed".to_string()))
            }
        }
    }

    /// Send one of the caller's rejected activities back for review
    pub async fn request_confirmation(
        pool: &PgPool,
        identity: &Identity,
        activity_id: &Uuid,
    ) -> AppResult<Activity> {
        let current = Self::find(pool, activity_id).await?;
        if current.student_id != identity.user_id {
            return Err(AppError::Forbidden("Not your activity".to_string()));
        }
        let target = current.status.resubmit()?;

        let activity = ActivityRepository::transition(pool, activity_id, current.status, target)
            .await?
            .ok_or_else(|| AppError::InvalidState("Activity changed, try again".to_string()))?;

        info!(activity_id = %activity.id, student_id = %activity.student_id, "Confirmation requested");

        Ok(activity)
    }

    /// Activities awaiting confirmation (staff)
    pub async fn pending_activities(pool: &PgPool, identity: &Identity) -> AppResult<Vec<Activity>> {
        identity.require_staff()?;
        ActivityRepository::list_pending(pool).await
    }

    async fn find<'e, E: sqlx::PgExecutor<'e>>(executor: E, activity_id: &Uuid) -> AppResult<Activity> {
        ActivityRepository::find_by_id(executor, activity_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))
    }
}
