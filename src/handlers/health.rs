//! Health check handlers

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use redis::AsyncCommands;
use serde::Serialize;
use tracing::warn;

use crate::{db, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response with per-dependency status
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub redis: bool,
}

/// Liveness endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness endpoint: 503 unless Postgres and Redis both answer
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match db::test_connection(state.db()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database not ready");
            false
        }
    };
    let redis = ping_redis(&state).await;

    let (code, status) = if database && redis {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        code,
        Json(ReadinessResponse {
            status,
            database,
            redis,
        }),
    )
}

async fn ping_redis(state: &AppState) -> bool {
    let result = async {
        let mut conn = state.redis().await?;
        conn.exists::<_, bool>("health:ping").await?;
        Ok::<_, crate::error::AppError>(())
    }
    .await;

    if let Err(e) = &result {
        warn!(error = %e, "Redis not ready");
    }
    result.is_ok()
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}
