//! Student handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Student routes, nested under `/student`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/request-hours", post(handler::request_hours))
        .route("/requests/{id}/withdraw", post(handler::withdraw_request))
        .route("/activities", post(handler::log_activity))
        .route(
            "/activities/{id}/request-confirmation",
            post(handler::request_confirmation),
        )
        .route("/dashboard", get(handler::dashboard))
        .route("/accolades", get(handler::accolades))
        .route("/confirmations", get(handler::confirmations))
        .route("/hours", get(handler::hours))
        .route("/history", get(handler::history))
        .route("/leaderboard", get(handler::leaderboard))
}
