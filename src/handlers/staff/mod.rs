//! Staff handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Staff routes, nested under `/staff`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/approve/{id}", post(handler::approve))
        .route("/deny/{id}", post(handler::deny))
        .route("/log-hours", post(handler::log_hours))
        .route("/activities/{id}/confirm", post(handler::confirm_activity))
        .route("/activities/{id}/reject", post(handler::reject_activity))
        .route(
            "/accolades",
            get(handler::accolades).post(handler::create_accolade),
        )
        .route("/accolades/{id}/award", post(handler::award_accolade))
        .route("/accolades/{id}/delete", post(handler::delete_accolade))
        .route("/dashboard", get(handler::dashboard))
        .route("/requests", get(handler::requests))
        .route("/requests/{id}", get(handler::request_detail))
        .route("/activities", get(handler::activities))
        .route("/leaderboard", get(handler::leaderboard))
}
