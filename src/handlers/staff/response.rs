//! Staff view models

use serde::Serialize;

use crate::models::{Accolade, Activity, HoursRequest, PendingRequest};

/// Request queue, optionally with one request opened
#[derive(Debug, Serialize)]
pub struct RequestsView {
    pub pending_requests: Vec<PendingRequest>,
    pub selected_request: Option<HoursRequest>,
}

/// Activities awaiting confirmation
#[derive(Debug, Serialize)]
pub struct ActivitiesView {
    pub pending_activities: Vec<Activity>,
}

/// Accolade registry
#[derive(Debug, Serialize)]
pub struct AccoladesView {
    pub accolades: Vec<Accolade>,
}
