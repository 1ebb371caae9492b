//! Database repositories
//!
//! Repositories handle all direct database interactions. Functions take any
//! Postgres executor so workflow steps can share one transaction.

pub mod accolade_repo;
pub mod activity_repo;
pub mod hours_request_repo;
pub mod leaderboard_repo;
pub mod logged_hours_repo;
pub mod student_repo;
pub mod user_repo;

pub use accolade_repo::AccoladeRepository;
pub use activity_repo::ActivityRepository;
pub use hours_request_repo::HoursRequestRepository;
pub use leaderboard_repo::LeaderboardRepository;
pub use logged_hours_repo::LoggedHoursRepository;
pub use student_repo::StudentRepository;
pub use user_repo::UserRepository;
