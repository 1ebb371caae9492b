//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    constants::{DEFAULT_ACTIVITY_LABEL, MAX_HOURS, roles},
    error::{AppError, AppResult},
    models::Role,
};

/// Usernames start with a letter and contain letters, digits, `_` or `-`
pub static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("username pattern is valid")
});

/// Hours must be a finite number in `0..=MAX_HOURS`. Zero is accepted.
pub fn validate_hours(hours: f64) -> AppResult<f64> {
    if !hours.is_finite() {
        return Err(AppError::Validation("Hours must be a number".to_string()));
    }
    if hours < 0.0 {
        return Err(AppError::Validation("Hours cannot be negative".to_string()));
    }
    if hours > MAX_HOURS {
        return Err(AppError::Validation(format!(
            "Hours cannot exceed {}",
            MAX_HOURS
        )));
    }
    Ok(hours)
}

/// Parse hours typed into a form field
pub fn parse_hours(input: &str) -> AppResult<f64> {
    let hours = input
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::Validation("Please enter valid hours".to_string()))?;
    validate_hours(hours)
}

/// Parse a registration role
pub fn parse_role(role: &str) -> AppResult<Role> {
    Role::parse(role.trim())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid role: {} (expected one of: {})",
                role,
                roles::ALL.join(", ")
            ))
        })
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitized activity label, falling back to the default label when blank
pub fn activity_label(input: Option<&str>) -> String {
    input
        .map(sanitize_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ACTIVITY_LABEL.to_string())
}
