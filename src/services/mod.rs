//! Business logic services
//!
//! Every workflow call takes the caller's [`Identity`](crate::models::Identity)
//! explicitly; services never read session state.

pub mod accolade_service;
pub mod activity_service;
pub mod auth_service;
pub mod hours_service;
pub mod leaderboard_service;
pub mod staff_service;
pub mod student_service;

pub use accolade_service::AccoladeService;
pub use activity_service::ActivityService;
pub use auth_service::AuthService;
pub use hours_service::HoursService;
pub use leaderboard_service::LeaderboardService;
pub use staff_service::StaffService;
pub use student_service::StudentService;
