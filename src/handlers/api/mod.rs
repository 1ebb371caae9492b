//! JSON API handlers
//!
//! Mirrors of the browser workflows for programmatic clients. Failures are
//! answered with the JSON error body instead of a flash redirect.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// API routes, nested under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/refresh", post(handler::refresh))
        .route("/logout", get(handler::logout))
        .route("/identify", get(handler::identify))
        .route("/password", put(handler::change_password))
        .route("/make_request", post(handler::make_request))
        .route("/accolades", get(handler::accolades))
        .route("/activity_history", get(handler::activity_history))
        .route("/accept_request", put(handler::accept_request))
        .route("/deny_request", put(handler::deny_request))
        .route("/delete_request", delete(handler::delete_request))
        .route("/delete_logs", delete(handler::delete_logs))
        .route("/leaderboard", get(handler::leaderboard))
}
