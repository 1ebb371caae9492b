//! JSON API request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_ACTIVITY_LABEL_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        max = MAX_PASSWORD_LENGTH,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub new_password: String,
}

/// New hours request
#[derive(Debug, Deserialize, Validate)]
pub struct MakeRequestRequest {
    pub hours: f64,

    #[validate(length(max = MAX_ACTIVITY_LABEL_LENGTH))]
    pub activity: Option<String>,
}

/// Body of accept, deny and delete request calls
#[derive(Debug, Deserialize)]
pub struct RequestIdRequest {
    pub request_id: Uuid,
}

/// Body of delete_logs
#[derive(Debug, Deserialize)]
pub struct LogIdRequest {
    pub log_id: Uuid,
}
