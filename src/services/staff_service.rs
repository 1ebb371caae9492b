//! Staff-facing views

use serde::Serialize;
use sqlx::PgPool;

use crate::{
    db::repositories::{ActivityRepository, HoursRequestRepository, UserRepository},
    error::AppResult,
    models::{Activity, Identity, PendingRequest, Role, User},
};

/// Staff dashboard view model
#[derive(Debug, Serialize)]
pub struct StaffDashboard {
    pub pending_count: usize,
    pub pending_requests: Vec<PendingRequest>,
    pub pending_activities: Vec<Activity>,
    pub student_count: usize,
    /// Students selectable in the log-hours form
    pub students: Vec<User>,
}

/// Staff views service
pub struct StaffService;

impl StaffService {
    /// Everything awaiting a staff decision
    pub async fn dashboard(pool: &PgPool, identity: &Identity) -> AppResult<StaffDashboard> {
        identity.require_staff()?;

        let (pending_requests, pending_activities, students) = futures::try_join!(
            HoursRequestRepository::list_pending(pool),
            ActivityRepository::list_pending(pool),
            UserRepository::list_by_role(pool, Role::Student),
        )?;

        Ok(StaffDashboard {
            pending_count: pending_requests.len(),
            pending_requests,
            pending_activities,
            student_count: students.len(),
            students,
        })
    }
}
