//! Authentication extractors
//!
//! The access token is read from `Authorization: Bearer <token>` (API clients)
//! or, failing that, from the session cookie set by the browser login flow.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Identity, Role},
    services::AuthService,
    state::AppState,
    utils::read_cookie,
};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// The identity passed into workflow calls
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.role)
    }
}

/// Pick the access token out of the request headers
fn token_from_headers<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    bearer.or_else(|| read_cookie(headers, cookie_name).filter(|t| !t.is_empty()))
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let path = parts.uri.path();
        let token = token_from_headers(&parts.headers, &state.config().session.cookie_name)
            .ok_or_else(|| {
                debug!(path = %path, "Auth failed: no access token");
                AppError::Unauthorized
            })?;

        let claims = AuthService::verify_token(token, &state.config().jwt.secret).map_err(|e| {
            debug!(path = %path, error = ?e, "Auth failed: token verification failed");
            e
        })?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| {
            debug!(path = %path, sub = %claims.sub, "Auth failed: invalid user ID in token");
            AppError::InvalidToken
        })?;

        let user = AuthenticatedUser {
            id,
            username: claims.username,
            role: claims.role,
        };
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}

/// Requires the `student` role. Rejects with 403 Forbidden otherwise.
pub struct StudentUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for StudentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != Role::Student {
            return Err(AppError::Forbidden("Access forbidden: Not a student".into()));
        }
        Ok(StudentUser(user))
    }
}

/// Requires the `staff` role. Rejects with 403 Forbidden otherwise.
pub struct StaffUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != Role::Staff {
            return Err(AppError::Forbidden("Access forbidden: Not a staff member".into()));
        }
        Ok(StaffUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};

    #[test]
    fn test_bearer_token_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer header-token"));
        headers.insert(COOKIE, HeaderValue::from_static("access_token=cookie-token"));

        assert_eq!(token_from_headers(&headers, "access_token"), Some("header-token"));
    }

    #[test]
    fn test_cookie_used_without_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(COOKIE, HeaderValue::from_static("access_token=cookie-token"));

        assert_eq!(token_from_headers(&headers, "access_token"), Some("cookie-token"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers, "access_token"), None);

        headers.insert(COOKIE, HeaderValue::from_static("access_token="));
        assert_eq!(token_from_headers(&headers, "access_token"), None);
    }
}
