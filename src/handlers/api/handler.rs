//! JSON API handler implementations

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::{AuthenticatedUser, StaffUser, StudentUser},
    models::{HoursRequest, Member},
    services::{
        AccoladeService, AuthService, HoursService, LeaderboardService, StudentService,
        auth_service::TokenPair, hours_service::Approval, leaderboard_service::Standing,
        student_service::ActivityHistory,
    },
    state::AppState,
    utils::{expired_cookie, session_cookie},
};

use super::{
    request::{
        ChangePasswordRequest, LogIdRequest, LoginRequest, MakeRequestRequest,
        RefreshTokenRequest, RequestIdRequest,
    },
    response::{AccoladesResponse, AuthResponse, MessageResponse},
};

/// Login with username/email and password.
///
/// Besides the token pair in the body, the access token is set as the
/// session cookie so browser clients can mix both surfaces.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    payload.validate()?;

    let (user, tokens) = AuthService::login(
        state.db(),
        state.redis().await?,
        state.config(),
        payload.username.trim(),
        &payload.password,
    )
    .await?;

    let cookie = session_cookie(&state.config().session, &tokens.access_token, tokens.expires_in);
    let mut response = Json(AuthResponse { tokens, user }).into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

/// Exchange a refresh token for a new pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<TokenPair>> {
    let tokens = AuthService::refresh(
        state.db(),
        state.redis().await?,
        state.config(),
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(tokens))
}

/// Revoke the caller's refresh tokens and clear the session cookie
pub async fn logout(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Response> {
    AuthService::logout(state.redis().await?, &user.id).await?;

    let mut response = Json(MessageResponse::new("Logged out successfully")).into_response();
    let session = &state.config().session;
    if let Some(cookie) = expired_cookie(&session.cookie_name, session.secure) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

/// The caller's user record and profile
pub async fn identify(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Member>> {
    let member = AuthService::identify(state.db(), &user.identity()).await?;
    Ok(Json(member))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::change_password(
        state.db(),
        &user.identity(),
        &payload.current_password,
        &payload.new_password,
    )
    .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Submit an hours request for the calling student
pub async fn make_request(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
    Json(payload): Json<MakeRequestRequest>,
) -> AppResult<(StatusCode, Json<HoursRequest>)> {
    payload.validate()?;

    let request = HoursService::create_request(
        state.db(),
        &user.identity(),
        payload.hours,
        payload.activity.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// Accolades held by the calling student; 404 when there are none
pub async fn accolades(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> AppResult<Json<AccoladesResponse>> {
    let accolades = AccoladeService::student_accolades(state.db(), &user.id).await?;
    if accolades.is_empty() {
        return Err(AppError::NotFound("No accolades found".to_string()));
    }

    Ok(Json(AccoladesResponse { accolades }))
}

pub async fn activity_history(
    State(state): State<AppState>,
    StudentUser(user): StudentUser,
) -> AppResult<Json<ActivityHistory>> {
    let history = StudentService::activity_history(state.db(), &user.identity()).await?;
    Ok(Json(history))
}

pub async fn accept_request(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Json(payload): Json<RequestIdRequest>,
) -> AppResult<Json<Approval>> {
    let approval = HoursService::approve(state.db(), &user.identity(), &payload.request_id).await?;
    Ok(Json(approval))
}

pub async fn deny_request(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Json(payload): Json<RequestIdRequest>,
) -> AppResult<Json<HoursRequest>> {
    let request = HoursService::deny(state.db(), &user.identity(), &payload.request_id).await?;
    Ok(Json(request))
}

/// Delete a request: staff may delete any, students their own pending ones
pub async fn delete_request(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RequestIdRequest>,
) -> AppResult<Json<MessageResponse>> {
    HoursService::delete_request(state.db(), &user.identity(), &payload.request_id).await?;
    Ok(Json(MessageResponse::new("Request deleted")))
}

pub async fn delete_logs(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Json(payload): Json<LogIdRequest>,
) -> AppResult<Json<MessageResponse>> {
    HoursService::delete_log(state.db(), &user.identity(), &payload.log_id).await?;
    Ok(Json(MessageResponse::new("Log deleted")))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Standing>>> {
    let standings = LeaderboardService::standings(state.db()).await?;
    Ok(Json(standings))
}
