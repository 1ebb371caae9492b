//! Authentication form DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, roles},
    utils::validation::USERNAME_REGEX,
};

fn default_role() -> String {
    roles::STUDENT.to_string()
}

/// Registration form
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(
        length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH),
        regex(path = *USERNAME_REGEX)
    )]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[serde(default = "default_role")]
    pub role: String,
}

/// Login form; `username` may also be an email address
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}
