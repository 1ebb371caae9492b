//! Hours request approval workflow

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{
        HoursRequestRepository, LoggedHoursRepository, StudentRepository, UserRepository,
        logged_hours_repo::NewLoggedHours,
    },
    error::{AppError, AppResult},
    models::{Decision, HoursRequest, Identity, LoggedHours, LoggedHoursStatus, PendingRequest},
    utils::{activity_label, sanitize_string, validate_hours},
};

/// Outcome of approving a request
#[derive(Debug, Clone, Serialize)]
pub struct Approval {
    pub request: HoursRequest,
    pub logged_hours: LoggedHours,
}

/// Hours request service
pub struct HoursService;

impl HoursService {
    /// Submit a pending hours request for the calling student
    pub async fn create_request(
        pool: &PgPool,
        identity: &Identity,
        hours: f64,
        activity: Option<&str>,
    ) -> AppResult<HoursRequest> {
        identity.require_student()?;
        let hours = validate_hours(hours)?;
        let activity = activity.map(sanitize_string).filter(|s| !s.is_empty());

        StudentRepository::find(pool, &identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let request = HoursRequestRepository::create(
            pool,
            &identity.user_id,
            hours,
            activity.as_deref(),
        )
        .await?;

        info!(request_id = %request.id, student_id = %request.student_id, hours, "Hours requested");

        Ok(request)
    }

    /// Approve a pending request, writing its ledger row in the same transaction
    pub async fn approve(
        pool: &PgPool,
        identity: &Identity,
        request_id: &Uuid,
    ) -> AppResult<Approval> {
        identity.require_staff()?;
        let mut tx = pool.begin().await?;

        let request = Self::resolve(&mut tx, identity, request_id, Decision::Approve).await?;
        let label = activity_label(request.activity.as_deref());
        let logged_hours = LoggedHoursRepository::create(
            &mut *tx,
            NewLoggedHours {
                student_id: request.student_id,
                staff_id: Some(identity.user_id),
                request_id: Some(request.id),
                hours: request.hours,
                status: LoggedHoursStatus::Approved,
                activity: &label,
            },
        )
        .await?;
        StudentRepository::add_hours(&mut *tx, &request.student_id, request.hours).await?;

        tx.commit().await?;

        info!(
            request_id = %request.id,
            student_id = %request.student_id,
            staff_id = %identity.user_id,
            hours = request.hours,
            "Hours request approved"
        );

        Ok(Approval {
            request,
            logged_hours,
        })
    }

    /// Deny a pending request; the ledger is untouched
    pub async fn deny(
        pool: &PgPool,
        identity: &Identity,
        request_id: &Uuid,
    ) -> AppResult<HoursRequest> {
        identity.require_staff()?;
        let mut tx = pool.begin().await?;
        let request = Self::resolve(&mut tx, identity, request_id, Decision::Deny).await?;
        tx.commit().await?;

        info!(
            request_id = %request.id,
            student_id = %request.student_id,
            staff_id = %identity.user_id,
            "Hours request denied"
        );

        Ok(request)
    }

    async fn resolve(
        tx: &mut sqlx::PgConnection,
        identity: &Identity,
        request_id: &Uuid,
        decision: Decision,
    ) -> AppResult<HoursRequest> {
        UserRepository::find_staff_profile(&mut *tx, &identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Staff not found".to_string()))?;

        if let Some(request) =
            HoursRequestRepository::resolve(&mut *tx, request_id, &identity.user_id, decision.target())
                .await?
        {
            return Ok(request);
        }

        let existing = HoursRequestRepository::find_by_id(&mut *tx, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;
        existing.status.resolve(decision)?;

        // Still pending yet not updated: another transaction holds it.
        Err(AppError::InvalidState("Request is being processed".to_string()))
    }

    /// All pending requests (staff)
    pub async fn list_pending(pool: &PgPool, identity: &Identity) -> AppResult<Vec<PendingRequest>> {
        identity.require_staff()?;
        HoursRequestRepository::list_pending(pool).await
    }

    /// A single request (staff)
    pub async fn get_request(
        pool: &PgPool,
        identity: &Identity,
        request_id: &Uuid,
    ) -> AppResult<HoursRequest> {
        identity.require_staff()?;
        HoursRequestRepository::find_by_id(pool, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))
    }

    /// Delete a request.
    ///
    /// Students may only withdraw their own pending requests; staff may delete any.
    pub async fn delete_request(
        pool: &PgPool,
        identity: &Identity,
        request_id: &Uuid,
    ) -> AppResult<()> {
        let request = HoursRequestRepository::find_by_id(pool, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

        if !identity.is_staff() {
            if request.student_id != identity.user_id {
                return Err(AppError::Forbidden("Not your request".to_string()));
            }
            if request.status.is_terminal() {
                return Err(AppError::InvalidState(format!(
                    "Request already processed ({})",
                    request.status
                )));
            }
        }

        if !HoursRequestRepository::delete(pool, request_id).await? {
            return Err(AppError::NotFound("Request not found".to_string()));
        }

        info!(request_id = %request_id, deleted_by = %identity.user_id, "Hours request deleted");

        Ok(())
    }

    /// Record hours for a student directly; the row is approved immediately
    pub async fn log_hours(
        pool: &PgPool,
        identity: &Identity,
        student_id: &Uuid,
        hours: f64,
        activity: Option<&str>,
    ) -> AppResult<LoggedHours> {
        identity.require_staff()?;
        let hours = validate_hours(hours)?;
        let label = activity_label(activity);

        let mut tx = pool.begin().await?;
        StudentRepository::find_for_update(&mut *tx, student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let logged_hours = LoggedHoursRepository::create(
            &mut *tx,
            NewLoggedHours {
                student_id: *student_id,
                staff_id: Some(identity.user_id),
                request_id: None,
                hours,
                status: LoggedHoursStatus::Approved,
                activity: &label,
            },
        )
        .await?;
        StudentRepository::add_hours(&mut *tx, student_id, hours).await?;
        tx.commit().await?;

        info!(
            log_id = %logged_hours.id,
            student_id = %student_id,
            staff_id = %identity.user_id,
            hours,
            "Hours logged"
        );

        Ok(logged_hours)
    }

    /// Remove a ledger row, taking its approved hours off the student's total
    pub async fn delete_log(pool: &PgPool, identity: &Identity, log_id: &Uuid) -> AppResult<()> {
        identity.require_staff()?;

        let mut tx = pool.begin().await?;
        let removed = LoggedHoursRepository::delete(&mut *tx, log_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Log not found".to_string()))?;
        if removed.status.counts_toward_total() {
            StudentRepository::add_hours(&mut *tx, &removed.student_id, -removed.hours).await?;
        }
        tx.commit().await?;

        info!(
            log_id = %log_id,
            student_id = %removed.student_id,
            hours = removed.hours,
            "Logged hours deleted"
        );

        Ok(())
    }

    /// Sum of approved logged hours and confirmed activities
    pub async fn approved_total(pool: &PgPool, student_id: &Uuid) -> AppResult<f64> {
        StudentRepository::approved_total(pool, student_id).await
    }
}
