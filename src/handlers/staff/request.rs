//! Staff form DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_ACCOLADE_NAME_LENGTH, MAX_ACTIVITY_LABEL_LENGTH},
    error::{AppError, AppResult},
};

/// Parse a student id typed into a form field
pub fn parse_student_id(input: &str) -> AppResult<Uuid> {
    Uuid::parse_str(input.trim())
        .map_err(|_| AppError::Validation("Please choose a valid student".to_string()))
}

/// Direct hours logging form
#[derive(Debug, Deserialize, Validate)]
pub struct LogHoursForm {
    pub student_id: String,

    pub hours: String,

    #[validate(length(max = MAX_ACTIVITY_LABEL_LENGTH))]
    pub activity: Option<String>,
}

/// Accolade template form
#[derive(Debug, Deserialize, Validate)]
pub struct AccoladeForm {
    #[validate(length(min = 1, max = MAX_ACCOLADE_NAME_LENGTH))]
    pub name: String,

    pub milestone_hours: String,
}

/// Accolade award form
#[derive(Debug, Deserialize)]
pub struct AwardForm {
    pub student_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_student_id(&format!(" {} ", id)).unwrap(), id);
        assert!(matches!(parse_student_id("42"), Err(AppError::Validation(_))));
    }
}
