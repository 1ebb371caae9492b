//! Browser-flow authentication handlers

use axum::{
    Form,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::Validate;

use crate::{
    constants::{LOGIN_PAGE_PATH, REGISTER_PAGE_PATH, STAFF_DASHBOARD_PATH, STUDENT_DASHBOARD_PATH},
    error::AppError,
    handlers::flash::{Flash, IncomingFlash, OrRedirect, Page, PageResult, redirect_with_flash, see_other},
    middleware::AuthenticatedUser,
    models::Role,
    services::AuthService,
    state::AppState,
    utils::{expired_cookie, parse_role, session_cookie},
};

use super::request::{LoginForm, RegisterForm};

/// Which page the browser is looking at
#[derive(Debug, Serialize)]
pub struct PageName {
    pub page: &'static str,
}

fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Student => STUDENT_DASHBOARD_PATH,
        Role::Staff => STAFF_DASHBOARD_PATH,
    }
}

/// Landing page: signed-in users go to their dashboard
pub async fn index(
    user: Result<AuthenticatedUser, AppError>,
    flash: IncomingFlash,
) -> Response {
    match user {
        Ok(user) => see_other(dashboard_for(user.role)),
        Err(_) => Page::new(flash, PageName { page: "login" }).into_response(),
    }
}

/// Registration page
pub async fn register_page(flash: IncomingFlash) -> Page<PageName> {
    Page::new(flash, PageName { page: "register" })
}

/// Log in and start a cookie session
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> PageResult<Response> {
    form.validate().map_err(AppError::from).or_redirect(LOGIN_PAGE_PATH)?;

    let redis = state.redis().await.or_redirect(LOGIN_PAGE_PATH)?;
    let (member, tokens) = AuthService::login(
        state.db(),
        redis,
        state.config(),
        form.username.trim(),
        &form.password,
    )
    .await
    .or_redirect(LOGIN_PAGE_PATH)?;

    let mut response =
        redirect_with_flash(dashboard_for(member.user.role), Flash::success("Login successful!"));
    if let Some(cookie) =
        session_cookie(&state.config().session, &tokens.access_token, tokens.expires_in)
    {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

/// Register a student or staff account
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> PageResult<Response> {
    form.validate().map_err(AppError::from).or_redirect(REGISTER_PAGE_PATH)?;
    let role = parse_role(&form.role).or_redirect(REGISTER_PAGE_PATH)?;

    AuthService::register(
        state.db(),
        form.username.trim(),
        form.email.trim(),
        &form.password,
        role,
    )
    .await
    .or_redirect(REGISTER_PAGE_PATH)?;

    Ok(redirect_with_flash(
        LOGIN_PAGE_PATH,
        Flash::success("Registration successful! Please login."),
    ))
}

/// End the session: revoke refresh tokens and clear the cookie
pub async fn logout(
    State(state): State<AppState>,
    user: Result<AuthenticatedUser, AppError>,
) -> PageResult<Response> {
    if let Ok(user) = user {
        let redis = state.redis().await?;
        AuthService::logout(redis, &user.id).await?;
    }

    let mut response = redirect_with_flash(LOGIN_PAGE_PATH, Flash::success("Logged out successfully!"));
    let session = &state.config().session;
    if let Some(cookie) = expired_cookie(&session.cookie_name, session.secure) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    Ok(response)
}
