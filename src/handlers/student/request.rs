//! Student form DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_ACTIVITY_LABEL_LENGTH, MAX_DESCRIPTION_LENGTH};

/// Hours request form. `hours` is parsed by the handler so a bad value
/// becomes a flash message rather than a rejected body.
#[derive(Debug, Deserialize, Validate)]
pub struct RequestHoursForm {
    pub hours: String,

    #[validate(length(max = MAX_ACTIVITY_LABEL_LENGTH))]
    pub activity: Option<String>,
}

/// Activity log form
#[derive(Debug, Deserialize, Validate)]
pub struct LogActivityForm {
    pub hours: String,

    #[serde(default)]
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,
}

/// Query string of the hours page
#[derive(Debug, Default, Deserialize)]
pub struct HoursQuery {
    /// `all`, or a status such as `pending` / `approved` / `denied`
    pub filter: Option<String>,
}
