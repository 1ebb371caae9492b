//! User model
//!
//! A user is one identity record plus a role tag; the role-specific attributes
//! live in a separate profile row and are combined into a [`Member`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
};

/// Role tag stored on every user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl Role {
    /// Get role as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => roles::STUDENT,
            Self::Staff => roles::STAFF,
        }
    }

    /// Parse role from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            roles::STUDENT => Some(Self::Student),
            roles::STAFF => Some(Self::Staff),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student-specific attributes
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StudentProfile {
    pub user_id: Uuid,
    pub total_hours: f64,
    pub points: i64,
}

/// Staff-specific attributes
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StaffProfile {
    pub user_id: Uuid,
    pub staff_code: Option<String>,
}

/// Role-specific attribute set
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Student(StudentProfile),
    Staff(StaffProfile),
}

/// A user together with the profile matching its role
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    #[serde(flatten)]
    pub user: User,
    pub profile: Profile,
}

impl Member {
    pub fn student(&self) -> Option<&StudentProfile> {
        match &self.profile {
            Profile::Student(p) => Some(p),
            Profile::Staff(_) => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.profile, Profile::Staff(_))
    }
}

/// The authenticated caller of a workflow operation.
///
/// Handlers build this from the verified token and pass it explicitly into
/// every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    /// Fail unless the caller is staff
    pub fn require_staff(&self) -> AppResult<()> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Staff access required".to_string()))
        }
    }

    /// Fail unless the caller is a student
    pub fn require_student(&self) -> AppResult<()> {
        if self.is_student() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Student access required".to_string()))
        }
    }
}
