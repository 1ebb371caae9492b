//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP and route bucket. Only
//! the credential endpoints are limited.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use redis::AsyncCommands;
use std::net::SocketAddr;
use tracing::warn;

use crate::{constants::rate_limits, error::AppError, state::AppState};

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(bucket) = path_bucket(request.uri().path()) else {
        return next.run(request).await;
    };
    // Without the peer address (e.g. in router tests) there is nothing to key on.
    let Some(ip) = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
    else {
        return next.run(request).await;
    };

    let key = format!("rate_limit:{}:{}", ip, bucket);
    match hit(&state, &key).await {
        Ok(count) if count > rate_limits::AUTH_MAX_REQUESTS => {
            warn!(ip = %ip, bucket, count, "Rate limit exceeded");
            AppError::TooManyRequests.into_response()
        }
        Ok(_) => next.run(request).await,
        Err(e) => {
            warn!(error = %e, "Rate limiter unavailable, letting request through");
            next.run(request).await
        }
    }
}

/// Count one request in the current window
async fn hit(state: &AppState, key: &str) -> Result<i64, AppError> {
    let mut redis = state.redis().await?;
    let count: i64 = redis.incr(key, 1).await?;
    if count == 1 {
        redis
            .expire::<_, ()>(key, rate_limits::AUTH_WINDOW_SECS)
            .await?;
    }
    Ok(count)
}

/// Bucket for limited paths; `None` means unlimited
fn path_bucket(path: &str) -> Option<&'static str> {
    match path {
        "/auth/login" | "/api/login" => Some("login"),
        "/auth/register" => Some("register"),
        "/api/refresh" => Some("refresh"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_credential_routes_are_limited() {
        assert_eq!(path_bucket("/auth/login"), Some("login"));
        assert_eq!(path_bucket("/api/login"), Some("login"));
        assert_eq!(path_bucket("/auth/register"), Some("register"));
        assert_eq!(path_bucket("/api/refresh"), Some("refresh"));
        assert_eq!(path_bucket("/student/dashboard"), None);
        assert_eq!(path_bucket("/api/make_request"), None);
    }
}
