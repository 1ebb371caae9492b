//! Service Hours - Community Service Hours Tracker
//!
//! Students submit hours requests and log activities; staff approve or deny
//! them, log hours directly and award accolades. Approved hours feed a
//! ledger that drives milestones and the leaderboard.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Workflows, each taking the caller's identity explicitly
//! - **Ledger**: Pure milestone, history and ranking computations
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
