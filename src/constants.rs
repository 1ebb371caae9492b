//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Maximum accepted request body size in bytes
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Default name of the cookie carrying the access token for browser flows
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "access_token";

/// Cookie carrying a one-shot flash message
pub const FLASH_COOKIE_NAME: &str = "flash";

/// Length of generated refresh tokens
pub const REFRESH_TOKEN_LENGTH: usize = 48;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers, as they appear in tokens and registration forms
pub mod roles {
    pub const STUDENT: &str = "student";
    pub const STAFF: &str = "staff";

    /// All user roles
    pub const ALL: &[&str] = &[STUDENT, STAFF];
}

// =============================================================================
// HOURS LEDGER
// =============================================================================

/// Cumulative approved-hours thresholds, ascending
pub const MILESTONE_THRESHOLDS: [u32; 4] = [10, 25, 50, 100];

/// Activity label used when none is supplied
pub const DEFAULT_ACTIVITY_LABEL: &str = "Community Service";

/// Maximum activity label length
pub const MAX_ACTIVITY_LABEL_LENGTH: u64 = 255;

/// Maximum activity description length
pub const MAX_DESCRIPTION_LENGTH: u64 = 500;

/// Largest number of hours a single request, log or activity may carry
pub const MAX_HOURS: f64 = 1_000.0;

/// Advisory lock serializing leaderboard projection rewrites
pub const LEADERBOARD_LOCK_KEY: i64 = 0x5348_4c42;

/// Maximum accolade name length
pub const MAX_ACCOLADE_NAME_LENGTH: u64 = 100;

/// Number of recent requests shown on the student dashboard
pub const DASHBOARD_RECENT_REQUESTS: usize = 5;

// =============================================================================
// HTML FLOW ROUTES
// =============================================================================

/// Where browser flows land after logout or an authentication failure
pub const LOGIN_PAGE_PATH: &str = "/";

/// Registration page
pub const REGISTER_PAGE_PATH: &str = "/register";

/// Student landing page
pub const STUDENT_DASHBOARD_PATH: &str = "/student/dashboard";

/// Staff landing page
pub const STAFF_DASHBOARD_PATH: &str = "/staff/dashboard";

/// Staff request queue
pub const STAFF_REQUESTS_PATH: &str = "/staff/requests";

/// Staff activity confirmation queue
pub const STAFF_ACTIVITIES_PATH: &str = "/staff/activities";

/// Staff accolade registry
pub const STAFF_ACCOLADES_PATH: &str = "/staff/accolades";

/// Student activity confirmations page
pub const STUDENT_CONFIRMATIONS_PATH: &str = "/student/confirmations";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;
}
