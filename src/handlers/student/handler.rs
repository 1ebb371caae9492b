//! Student page handlers

use axum::{
    Form,
    extract::{Path, Query, State},
    response::Response,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{STUDENT_CONFIRMATIONS_PATH, STUDENT_DASHBOARD_PATH},
    error::AppError,
    handlers::flash::{Flash, IncomingFlash, OrRedirect, Page, PageResult, redirect_with_flash},
    ledger::HistoryEntry,
    middleware::StudentUser,
    services::{
        ActivityService, HoursService, LeaderboardService, StudentService,
        leaderboard_service::Standing,
        student_service::{StudentAccolades, StudentConfirmations, StudentDashboard, StudentHours},
    },
    state::AppState,
    utils::parse_hours,
};

use super::request::{HoursQuery, LogActivityForm, RequestHoursForm};

/// Submit an hours request
pub async fn request_hours(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    Form(form): Form<RequestHoursForm>,
) -> PageResult<Response> {
    let StudentUser(user) = user?;
    form.validate().map_err(AppError::from).or_redirect(STUDENT_DASHBOARD_PATH)?;
    let hours = parse_hours(&form.hours).or_redirect(STUDENT_DASHBOARD_PATH)?;

    let request = HoursService::create_request(
        state.db(),
        &user.identity(),
        hours,
        form.activity.as_deref(),
    )
    .await
    .or_redirect(STUDENT_DASHBOARD_PATH)?;

    Ok(redirect_with_flash(
        STUDENT_DASHBOARD_PATH,
        Flash::success(format!("Successfully requested {} hours!", request.hours)),
    ))
}

/// Withdraw one of the student's pending requests
pub async fn withdraw_request(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    Path(request_id): Path<Uuid>,
) -> PageResult<Response> {
    let StudentUser(user) = user?;

    HoursService::delete_request(state.db(), &user.identity(), &request_id)
        .await
        .or_redirect(STUDENT_CONFIRMATIONS_PATH)?;

    Ok(redirect_with_flash(
        STUDENT_CONFIRMATIONS_PATH,
        Flash::success("Request withdrawn"),
    ))
}

/// Log an activity for staff confirmation
pub async fn log_activity(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    Form(form): Form<LogActivityForm>,
) -> PageResult<Response> {
    let StudentUser(user) = user?;
    form.validate().map_err(AppError::from).or_redirect(STUDENT_CONFIRMATIONS_PATH)?;
    let hours = parse_hours(&form.hours).or_redirect(STUDENT_CONFIRMATIONS_PATH)?;

    let activity = ActivityService::log_activity(state.db(), &user.identity(), hours, &form.description)
        .await
        .or_redirect(STUDENT_CONFIRMATIONS_PATH)?;

    Ok(redirect_with_flash(
        STUDENT_CONFIRMATIONS_PATH,
        Flash::success(format!(
            "Logged {} hours, awaiting confirmation",
            activity.hours_logged
        )),
    ))
}

/// Resubmit a rejected activity
pub async fn request_confirmation(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    Path(activity_id): Path<Uuid>,
) -> PageResult<Response> {
    let StudentUser(user) = user?;

    ActivityService::request_confirmation(state.db(), &user.identity(), &activity_id)
        .await
        .or_redirect(STUDENT_CONFIRMATIONS_PATH)?;

    Ok(redirect_with_flash(
        STUDENT_CONFIRMATIONS_PATH,
        Flash::success("Confirmation requested"),
    ))
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<StudentDashboard>> {
    let StudentUser(user) = user?;
    let view = StudentService::dashboard(state.db(), &user.identity()).await?;
    Ok(Page::new(flash, view))
}

pub async fn accolades(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<StudentAccolades>> {
    let StudentUser(user) = user?;
    let view = StudentService::accolades(state.db(), &user.identity())
        .await
        .or_redirect(STUDENT_DASHBOARD_PATH)?;
    Ok(Page::new(flash, view))
}

pub async fn confirmations(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<StudentConfirmations>> {
    let StudentUser(user) = user?;
    let view = StudentService::confirmations(state.db(), &user.identity())
        .await
        .or_redirect(STUDENT_DASHBOARD_PATH)?;
    Ok(Page::new(flash, view))
}

pub async fn hours(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    Query(query): Query<HoursQuery>,
    flash: IncomingFlash,
) -> PageResult<Page<StudentHours>> {
    let StudentUser(user) = user?;
    let view = StudentService::hours(state.db(), &user.identity(), query.filter.as_deref())
        .await
        .or_redirect(STUDENT_DASHBOARD_PATH)?;
    Ok(Page::new(flash, view))
}

/// Ledger history, newest first, with milestone crossings
pub async fn history(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<Vec<HistoryEntry>>> {
    let StudentUser(user) = user?;
    let view = StudentService::history(state.db(), &user.id)
        .await
        .or_redirect(STUDENT_DASHBOARD_PATH)?;
    Ok(Page::new(flash, view))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    user: Result<StudentUser, AppError>,
    flash: IncomingFlash,
) -> PageResult<Page<Vec<Standing>>> {
    user?;
    let view = LeaderboardService::standings(state.db())
        .await
        .or_redirect(STUDENT_DASHBOARD_PATH)?;
    Ok(Page::new(flash, view))
}
