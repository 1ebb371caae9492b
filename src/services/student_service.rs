//! Student-facing views over the hours ledger

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{DASHBOARD_RECENT_REQUESTS, MILESTONE_THRESHOLDS},
    db::repositories::{
        AccoladeRepository, ActivityRepository, HoursRequestRepository, LoggedHoursRepository,
        StudentRepository, UserRepository,
    },
    error::{AppError, AppResult},
    ledger::{
        HistoryEntry, LedgerEntry, Milestone, hours_to_next, milestone_progress, milestones_for,
        next_milestone, replay,
    },
    models::{Accolade, Activity, HoursRequest, Identity, RequestStatus},
};

/// Student dashboard view model
#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub username: String,
    pub confirmed_hours: f64,
    pub pending_hours: f64,
    pub pending_requests: usize,
    pub milestones: Vec<Milestone>,
    pub next_milestone: Option<Milestone>,
    pub hours_to_next: Option<f64>,
    pub milestone_progress: u8,
    pub recent_requests: Vec<HoursRequest>,
}

/// A milestone not reached yet, with progress toward it
#[derive(Debug, Serialize)]
pub struct UpcomingMilestone {
    pub name: Milestone,
    pub hours: u32,
    pub progress: u8,
}

/// Accolades page view model
#[derive(Debug, Serialize)]
pub struct StudentAccolades {
    pub total_hours: f64,
    pub accolades: Vec<Accolade>,
    pub milestones: Vec<Milestone>,
    pub upcoming_milestones: Vec<UpcomingMilestone>,
}

/// Confirmations page view model
#[derive(Debug, Serialize)]
pub struct StudentConfirmations {
    pub total_confirmed: f64,
    pub pending_requests: Vec<HoursRequest>,
    pub resolved_requests: Vec<HoursRequest>,
    pub activities: Vec<Activity>,
}

/// Hours page view model: requests and ledger rows merged, newest first
#[derive(Debug, Serialize)]
pub struct StudentHours {
    pub filter: Option<String>,
    pub entries: Vec<LedgerEntry>,
}

/// Annotated history of one student
#[derive(Debug, Serialize)]
pub struct ActivityHistory {
    pub student_id: Uuid,
    pub student_name: String,
    pub activity_history: Vec<HistoryEntry>,
}

/// Student views service
pub struct StudentService;

impl StudentService {
    /// Totals, milestone progress and recent requests for the calling student
    pub async fn dashboard(pool: &PgPool, identity: &Identity) -> AppResult<StudentDashboard> {
        identity.require_student()?;
        let student_id = identity.user_id;

        let (user, confirmed_hours, requests) = futures::try_join!(
            UserRepository::find_by_id(pool, &student_id),
            StudentRepository::approved_total(pool, &student_id),
            HoursRequestRepository::list_for_student(pool, &student_id, None),
        )?;
        let user = user.ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let pending: Vec<&HoursRequest> = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .collect();

        Ok(StudentDashboard {
            username: user.username,
            confirmed_hours,
            pending_hours: pending.iter().map(|r| r.hours).sum(),
            pending_requests: pending.len(),
            milestones: milestones_for(confirmed_hours),
            next_milestone: next_milestone(confirmed_hours),
            hours_to_next: hours_to_next(confirmed_hours),
            milestone_progress: milestone_progress(confirmed_hours),
            recent_requests: requests
                .into_iter()
                .take(DASHBOARD_RECENT_REQUESTS)
                .collect(),
        })
    }

    /// Awarded accolades plus progress toward the remaining milestones
    pub async fn accolades(pool: &PgPool, identity: &Identity) -> AppResult<StudentAccolades> {
        identity.require_student()?;

        let (total_hours, accolades) = futures::try_join!(
            StudentRepository::approved_total(pool, &identity.user_id),
            AccoladeRepository::list_for_student(pool, &identity.user_id),
        )?;

        let upcoming_milestones = MILESTONE_THRESHOLDS
            .iter()
            .filter(|&&hours| f64::from(hours) > total_hours)
            .map(|&hours| UpcomingMilestone {
                name: Milestone { hours },
                hours,
                progress: (total_hours.max(0.0) / f64::from(hours) * 100.0).floor().min(100.0)
                    as u8,
            })
            .collect();

        Ok(StudentAccolades {
            total_hours,
            accolades,
            milestones: milestones_for(total_hours),
            upcoming_milestones,
        })
    }

    /// Requests split by outcome, and the student's activity logs
    pub async fn confirmations(
        pool: &PgPool,
        identity: &Identity,
    ) -> AppResult<StudentConfirmations> {
        identity.require_student()?;

        let (total_confirmed, requests, activities) = futures::try_join!(
            StudentRepository::approved_total(pool, &identity.user_id),
            HoursRequestRepository::list_for_student(pool, &identity.user_id, None),
            ActivityRepository::list_for_student(pool, &identity.user_id),
        )?;

        let (pending_requests, resolved_requests): (Vec<_>, Vec<_>) = requests
            .into_iter()
            .partition(|r| r.status == RequestStatus::Pending);

        Ok(StudentConfirmations {
            total_confirmed,
            pending_requests,
            resolved_requests,
            activities,
        })
    }

    /// Every request and ledger row, newest first, optionally filtered by status
    pub async fn hours(
        pool: &PgPool,
        identity: &Identity,
        filter: Option<&str>,
    ) -> AppResult<StudentHours> {
        identity.require_student()?;

        let (requests, logged) = futures::try_join!(
            HoursRequestRepository::list_for_student(pool, &identity.user_id, None),
            LoggedHoursRepository::list_for_student(pool, &identity.user_id),
        )?;

        let filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty() && *f != "all")
            .map(str::to_lowercase);

        let mut entries: Vec<LedgerEntry> = requests
            .iter()
            .map(LedgerEntry::from)
            .chain(logged.iter().map(LedgerEntry::from))
            .filter(|e| filter.as_deref().is_none_or(|f| e.status == f))
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));

        Ok(StudentHours { filter, entries })
    }

    /// Replay a student's ledger and return it newest first
    pub async fn history(pool: &PgPool, student_id: &Uuid) -> AppResult<Vec<HistoryEntry>> {
        let (logged, activities) = futures::try_join!(
            LoggedHoursRepository::list_for_student(pool, student_id),
            ActivityRepository::list_for_student(pool, student_id),
        )?;

        let entries = logged
            .iter()
            .map(LedgerEntry::from)
            .chain(activities.iter().map(LedgerEntry::from))
            .collect();

        let mut history = replay(entries);
        history.reverse();
        Ok(history)
    }

    /// History of the calling student, labelled with their name
    pub async fn activity_history(
        pool: &PgPool,
        identity: &Identity,
    ) -> AppResult<ActivityHistory> {
        identity.require_student()?;

        let user = UserRepository::find_by_id(pool, &identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
        let activity_history = Self::history(pool, &identity.user_id).await?;

        Ok(ActivityHistory {
            student_id: user.id,
            student_name: user.username,
            activity_history,
        })
    }
}
