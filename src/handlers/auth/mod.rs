//! Browser-flow authentication handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Authentication routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::index))
        .route("/register", get(handler::register_page))
        .route("/auth/login", post(handler::login))
        .route("/auth/register", post(handler::register))
        .route("/logout", get(handler::logout))
}
