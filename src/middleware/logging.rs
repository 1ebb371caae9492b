//! Request logging middleware

use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// How a completed request is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    Redirect,
    ClientError,
    ServerError,
}

fn classify(status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::ServerError
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        Outcome::ClientError
    } else if status.is_redirection() {
        Outcome::Redirect
    } else {
        Outcome::Ok
    }
}

/// Log method, path, status and duration of every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match classify(status) {
        Outcome::ServerError => warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed with server error"
        ),
        Outcome::ClientError => warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed with client error"
        ),
        Outcome::Redirect => {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            info!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                location = %location,
                duration_ms = %duration_ms,
                "Request redirected"
            )
        }
        Outcome::Ok => info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_a_warning() {
        assert_eq!(classify(StatusCode::NOT_FOUND), Outcome::Ok);
        assert_eq!(classify(StatusCode::FORBIDDEN), Outcome::ClientError);
        assert_eq!(classify(StatusCode::CONFLICT), Outcome::ClientError);
        assert_eq!(classify(StatusCode::INTERNAL_SERVER_ERROR), Outcome::ServerError);
        assert_eq!(classify(StatusCode::SEE_OTHER), Outcome::Redirect);
        assert_eq!(classify(StatusCode::OK), Outcome::Ok);
    }
}
