//! HTTP Request Handlers
//!
//! Browser flows (`auth`, `student`, `staff`) answer with JSON page payloads
//! and flash redirects; `api` answers with JSON bodies and error statuses.

pub mod api;
pub mod auth;
pub mod flash;
pub mod health;
pub mod staff;
pub mod student;

use axum::{Router, middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{
    constants::MAX_REQUEST_BODY_BYTES,
    middleware::{logging_middleware, rate_limit_middleware},
    state::AppState,
};

/// Every route of the service
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .nest("/student", student::routes())
        .nest("/staff", staff::routes())
        .nest("/api", api::routes())
}

/// Routes with the middleware stack applied and state attached
pub fn router(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        models::Role,
        test_utils::test_app::{create_test_app, token_for},
    };

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let response = create_test_app()
            .oneshot(Request::get("/api/identify").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_api_rejects_garbage_token() {
        let response = create_test_app()
            .oneshot(
                Request::get("/api/identify")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_staff_cannot_make_request() {
        let response = create_test_app()
            .oneshot(
                Request::post("/api/make_request")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token_for(Role::Staff)))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"hours": 3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_student_cannot_accept_request() {
        let response = create_test_app()
            .oneshot(
                Request::put("/api/accept_request")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token_for(Role::Student)))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(r#"{{"request_id": "{}"}}"#, uuid::Uuid::new_v4())))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_negative_hours_rejected_before_storage() {
        let response = create_test_app()
            .oneshot(
                Request::post("/api/make_request")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token_for(Role::Student)))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"hours": -2.5}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_page_without_session_redirects_to_login() {
        let response = create_test_app()
            .oneshot(Request::get("/student/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash=error."));
    }

    #[tokio::test]
    async fn test_student_session_cannot_open_staff_pages() {
        let response = create_test_app()
            .oneshot(
                Request::get("/staff/dashboard")
                    .header(header::COOKIE, format!("access_token={}", token_for(Role::Student)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_negative_hours_form_flashes_error() {
        let response = create_test_app()
            .oneshot(
                Request::post("/student/request-hours")
                    .header(header::COOKIE, format!("access_token={}", token_for(Role::Student)))
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("hours=-4"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/student/dashboard");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash=error."));
    }

    #[tokio::test]
    async fn test_login_page_for_anonymous_visitor() {
        let response = create_test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["page"], "login");
    }

    #[tokio::test]
    async fn test_signed_in_visitor_goes_to_dashboard() {
        let response = create_test_app()
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, format!("access_token={}", token_for(Role::Staff)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/staff/dashboard");
    }
}
