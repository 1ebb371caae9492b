//! User repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Role, StaffProfile, StudentProfile, User},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Attach the student profile to a freshly created user
    pub async fn create_student_profile<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
    ) -> AppResult<StudentProfile> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"INSERT INTO students (user_id) VALUES ($1) RETURNING *"#,
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    /// Attach the staff profile to a freshly created user
    pub async fn create_staff_profile<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
    ) -> AppResult<StaffProfile> {
        let profile = sqlx::query_as::<_, StaffProfile>(
            r#"INSERT INTO staff (user_id) VALUES ($1) RETURNING *"#,
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    /// Find user by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Find user by username or email (for login)
    pub async fn find_by_identifier<'e, E: PgExecutor<'e>>(
        executor: E,
        identifier: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE username = $1 OR email = $1"#,
        )
        .bind(identifier)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Whether the username or the email is already registered.
    ///
    /// Returns `(username_taken, email_taken)`.
    pub async fn identity_taken<'e, E: PgExecutor<'e>>(
        executor: E,
        username: &str,
        email: &str,
    ) -> AppResult<(bool, bool)> {
        let taken: (bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM users WHERE username = $1),
                EXISTS (SELECT 1 FROM users WHERE email = $2)
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(executor)
        .await?;

        Ok(taken)
    }

    /// Find the staff profile of a user, if the user is staff
    pub async fn find_staff_profile<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
    ) -> AppResult<Option<StaffProfile>> {
        let profile = sqlx::query_as::<_, StaffProfile>(r#"SELECT * FROM staff WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

        Ok(profile)
    }

    /// Replace the password hash
    pub async fn update_password<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        password_hash: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// List users of a role, oldest first
    pub async fn list_by_role<'e, E: PgExecutor<'e>>(executor: E, role: Role) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE role = $1 ORDER BY created_at, id"#,
        )
        .bind(role)
        .fetch_all(executor)
        .await?;

        Ok(users)
    }
}
