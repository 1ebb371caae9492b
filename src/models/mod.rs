//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod accolade;
pub mod activity;
pub mod hours;
pub mod leaderboard;
pub mod user;

pub use accolade::*;
pub use activity::*;
pub use hours::*;
pub use leaderboard::*;
pub use user::*;
