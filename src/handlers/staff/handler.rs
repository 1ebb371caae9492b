//! Staff page handlers

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{
        STAFF_ACCOLADES_PATH, STAFF_ACTIVITIES_PATH, STAFF_DASHBOARD_PATH, STAFF_REQUESTS_PATH,
    },
    error::AppError,
    handlers::flash::{Flash, IncomingFlash, OrRedirect, Page, PageResult, redirect_with_flash},
    middleware::StaffUser,
    services::{
        AccoladeService, ActivityService, HoursService, LeaderboardService, StaffService,
        leaderboard_service::Standing, staff_service::StaffDashboard,
    },
    state::AppState,
    utils::parse_hours,
};

use super::{
    request::{AccoladeForm, AwardForm, LogHoursForm, parse_student_id},
    response::{AccoladesView, ActivitiesView, RequestsView},
};

/// Approve a pending request
pub async fn approve(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(request_id): Path<Uuid>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;

    let approval = HoursService::approve(state.db(), &user.identity(), &request_id)
        .await
        .or_redirect(STAFF_REQUESTS_PATH)?;

    Ok(redirect_with_flash(
        STAFF_REQUESTS_PATH,
        Flash::success(format!("Approved {} hours", approval.logged_hours.hours)),
    ))
}

/// Deny a pending request
pub async fn deny(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(request_id): Path<Uuid>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;

    HoursService::deny(state.db(), &user.identity(), &request_id)
        .await
        .or_redirect(STAFF_REQUESTS_PATH)?;

    Ok(redirect_with_flash(STAFF_REQUESTS_PATH, Flash::success("Request denied")))
}

/// Log approved hours directly for a student
pub async fn log_hours(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Form(form): Form<LogHoursForm>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;
    form.validate().map_err(AppError::from).or_redirect(STAFF_DASHBOARD_PATH)?;
    let student_id = parse_student_id(&form.student_id).or_redirect(STAFF_DASHBOARD_PATH)?;
    let hours = parse_hours(&form.hours).or_redirect(STAFF_DASHBOARD_PATH)?;

    let logged = HoursService::log_hours(
        state.db(),
        &user.identity(),
        &student_id,
        hours,
        form.activity.as_deref(),
    )
    .await
    .or_redirect(STAFF_DASHBOARD_PATH)?;

    Ok(redirect_with_flash(
        STAFF_DASHBOARD_PATH,
        Flash::success(format!("Successfully logged {} hours!", logged.hours)),
    ))
}

pub async fn confirm_activity(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(activity_id): Path<Uuid>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;

    let activity = ActivityService::confirm(state.db(), &user.identity(), &activity_id)
        .await
        .or_redirect(STAFF_ACTIVITIES_PATH)?;

    Ok(redirect_with_flash(
        STAFF_ACTIVITIES_PATH,
        Flash::success(format!("Confirmed {} hours", activity.hours_logged)),
    ))
}

pub async fn reject_activity(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(activity_id): Path<Uuid>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;

    ActivityService::reject(state.db(), &user.identity(), &activity_id)
        .await
        .or_redirect(STAFF_ACTIVITIES_PATH)?;

    Ok(redirect_with_flash(STAFF_ACTIVITIES_PATH, Flash::success("Activity rejected")))
}

/// Create an accolade template
pub async fn create_accolade(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Form(form): Form<AccoladeForm>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;
    form.validate().map_err(AppError::from).or_redirect(STAFF_ACCOLADES_PATH)?;
    let milestone_hours = form
        .milestone_hours
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Please enter whole milestone hours".to_string()))
        .or_redirect(STAFF_ACCOLADES_PATH)?;

    let accolade =
        AccoladeService::create_template(state.db(), &user.identity(), &form.name, milestone_hours)
            .await
            .or_redirect(STAFF_ACCOLADES_PATH)?;

    Ok(redirect_with_flash(
        STAFF_ACCOLADES_PATH,
        Flash::success(format!("Created accolade '{}'", accolade.name)),
    ))
}

pub async fn award_accolade(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(accolade_id): Path<Uuid>,
    Form(form): Form<AwardForm>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;
    let student_id = parse_student_id(&form.student_id).or_redirect(STAFF_ACCOLADES_PATH)?;

    let accolade = AccoladeService::award(state.db(), &user.identity(), &accolade_id, &student_id)
        .await
        .or_redirect(STAFF_ACCOLADES_PATH)?;

    Ok(redirect_with_flash(
        STAFF_ACCOLADES_PATH,
        Flash::success(format!("Awarded '{}'", accolade.name)),
    ))
}

pub async fn delete_accolade(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(accolade_id): Path<Uuid>,
) -> PageResult<Response> {
    let StaffUser(user) = user?;

    AccoladeService::delete(state.db(), &user.identity(), &accolade_id)
        .await
        .or_redirect(STAFF_ACCOLADES_PATH)?;

    Ok(redirect_with_flash(STAFF_ACCOLADES_PATH, Flash::success("Accolade deleted")))
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<StaffDashboard>> {
    let StaffUser(user) = user?;
    let view = StaffService::dashboard(state.db(), &user.identity()).await?;
    Ok(Page::new(flash, view))
}

pub async fn requests(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<RequestsView>> {
    let StaffUser(user) = user?;
    let pending_requests = HoursService::list_pending(state.db(), &user.identity())
        .await
        .or_redirect(STAFF_DASHBOARD_PATH)?;
    Ok(Page::new(
        flash,
        RequestsView {
            pending_requests,
            selected_request: None,
        },
    ))
}

/// Request queue with one request opened
pub async fn request_detail(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    Path(request_id): Path<Uuid>,
    flash: IncomingFlash,
) -> PageResult<Page<RequestsView>> {
    let StaffUser(user) = user?;
    let identity = user.identity();

    let (pending_requests, selected) = futures::try_join!(
        HoursService::list_pending(state.db(), &identity),
        HoursService::get_request(state.db(), &identity, &request_id),
    )
    .or_redirect(STAFF_REQUESTS_PATH)?;

    Ok(Page::new(
        flash,
        RequestsView {
            pending_requests,
            selected_request: Some(selected),
        },
    ))
}

pub async fn activities(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<ActivitiesView>> {
    let StaffUser(user) = user?;
    let pending_activities = ActivityService::pending_activities(state.db(), &user.identity())
        .await
        .or_redirect(STAFF_DASHBOARD_PATH)?;
    Ok(Page::new(flash, ActivitiesView { pending_activities }))
}

pub async fn accolades(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<AccoladesView>> {
    let StaffUser(user) = user?;
    let accolades = AccoladeService::list_all(state.db(), &user.identity())
        .await
        .or_redirect(STAFF_DASHBOARD_PATH)?;
    Ok(Page::new(flash, AccoladesView { accolades }))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    user: Result<StaffUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<Vec<Standing>>> {
    user?;
    let view = LeaderboardService::standings(state.db())
        .await
        .or_redirect(STAFF_DASHBOARD_PATH)?;
    Ok(Page::new(flash, view))
}
