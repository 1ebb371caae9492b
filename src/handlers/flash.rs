//! Flash messages and redirects for the browser flows
//!
//! Mutations in the HTML flows answer `303 See Other` and leave a one-shot
//! message in a cookie; the next page view returns it and clears the cookie.

use std::convert::Infallible;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    constants::{FLASH_COOKIE_NAME, LOGIN_PAGE_PATH},
    error::AppError,
    utils::{expired_cookie, read_cookie, transient_cookie},
};

/// Flash message category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A one-shot message shown on the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Cookie encoding: `<kind>.<hex(message)>`
    fn encode(&self) -> String {
        format!("{}.{}", self.kind.as_str(), hex::encode(self.message.as_bytes()))
    }

    fn decode(raw: &str) -> Option<Self> {
        let (kind, message) = raw.split_once('.')?;
        let kind = match kind {
            "success" => FlashKind::Success,
            "error" => FlashKind::Error,
            _ => return None,
        };
        let message = String::from_utf8(hex::decode(message).ok()?).ok()?;
        Some(Self { kind, message })
    }
}

/// `303 See Other` to `to`, carrying a flash message
pub fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    let mut response = see_other(to);
    if let Some(cookie) = transient_cookie(FLASH_COOKIE_NAME, &flash.encode(), false) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// Plain `303 See Other`
pub fn see_other(to: &str) -> Response {
    let location = HeaderValue::from_str(to).unwrap_or(HeaderValue::from_static(LOGIN_PAGE_PATH));
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

/// Flash message left by the previous request, if any
#[derive(Debug, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(IncomingFlash(
            read_cookie(&parts.headers, FLASH_COOKIE_NAME).and_then(Flash::decode),
        ))
    }
}

/// A page view model together with the pending flash message
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub flash: Option<Flash>,
    pub data: T,
}

impl<T> Page<T> {
    pub fn new(flash: IncomingFlash, data: T) -> Self {
        Self {
            flash: flash.0,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let consumed = self.flash.is_some();
        let mut response = Json(self).into_response();
        if consumed {
            if let Some(cookie) = expired_cookie(FLASH_COOKIE_NAME, false) {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
        }
        response
    }
}

/// Error in a browser flow: rendered as a redirect with an error flash.
///
/// Authentication and role failures go back to the login page.
#[derive(Debug)]
pub struct PageError {
    pub error: AppError,
    pub redirect_to: &'static str,
}

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            redirect_to: LOGIN_PAGE_PATH,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let to = match self.error {
            AppError::Forbidden(_) => LOGIN_PAGE_PATH,
            ref e if e.is_authentication_failure() => LOGIN_PAGE_PATH,
            _ => self.redirect_to,
        };
        redirect_with_flash(to, Flash::error(self.error.public_message()))
    }
}

/// Result type for browser-flow handlers
pub type PageResult<T> = Result<T, PageError>;

/// Attach the page to return to when a workflow call fails
pub trait OrRedirect<T> {
    fn or_redirect(self, to: &'static str) -> PageResult<T>;
}

impl<T> OrRedirect<T> for Result<T, AppError> {
    fn or_redirect(self, to: &'static str) -> PageResult<T> {
        self.map_err(|error| PageError {
            error,
            redirect_to: to,
        })
    }
}
