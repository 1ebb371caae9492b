//! Authentication service

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::REFRESH_TOKEN_LENGTH,
    db::repositories::{StudentRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Identity, Member, Profile, Role, StaffProfile, User},
    utils::{generate_secure_token, hash_string},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Access and refresh token issued at login or refresh
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user together with the profile for its role
    pub async fn register(
        pool: &PgPool,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<Member> {
        let (username_taken, email_taken) =
            UserRepository::identity_taken(pool, username, email).await?;
        if username_taken {
            return Err(AppError::DuplicateIdentity("Username already taken".to_string()));
        }
        if email_taken {
            return Err(AppError::DuplicateIdentity("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;

        // A concurrent registration still trips the unique constraints,
        // which surface as DuplicateIdentity as well.
        let mut tx = pool.begin().await?;
        let user = UserRepository::create(&mut *tx, username, email, &password_hash, role).await?;
        let profile = match role {
            Role::Student => {
                Profile::Student(UserRepository::create_student_profile(&mut *tx, &user.id).await?)
            }
            Role::Staff => {
                Profile::Staff(UserRepository::create_staff_profile(&mut *tx, &user.id).await?)
            }
        };
        tx.commit().await?;

        info!(user_id = %user.id, username = %user.username, role = %role, "User registered");

        Ok(Member { user, profile })
    }

    /// Login with username/email and password
    pub async fn login(
        pool: &PgPool,
        redis: MultiplexedConnection,
        config: &Config,
        identifier: &str,
        password: &str,
    ) -> AppResult<(Member, TokenPair)> {
        let user = UserRepository::find_by_identifier(pool, identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let tokens = Self::issue_tokens(redis, config, &user).await?;
        let member = Self::load_member(pool, user).await?;

        info!(user_id = %member.user.id, "User logged in");

        Ok((member, tokens))
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// The presented token is consumed; replaying it fails.
    pub async fn refresh(
        pool: &PgPool,
        mut redis: MultiplexedConnection,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<TokenPair> {
        let key = Self::refresh_key(refresh_token);
        let owner: Option<String> = redis.get_del(&key).await?;
        let user_id = owner
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or(AppError::InvalidToken)?;

        redis
            .srem::<_, _, ()>(Self::user_tokens_key(&user_id), hash_string(refresh_token))
            .await?;

        let user = UserRepository::find_by_id(pool, &user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Self::issue_tokens(redis, config, &user).await
    }

    /// Revoke every refresh token of a user
    pub async fn logout(mut redis: MultiplexedConnection, user_id: &Uuid) -> AppResult<()> {
        let set_key = Self::user_tokens_key(user_id);
        let digests: Vec<String> = redis.smembers(&set_key).await?;

        let mut keys: Vec<String> = digests
            .iter()
            .map(|digest| format!("refresh_token:{}", digest))
            .collect();
        keys.push(set_key);
        redis.del::<_, ()>(keys).await?;

        info!(user_id = %user_id, "User logged out");

        Ok(())
    }

    /// The caller's user record and profile
    pub async fn identify(pool: &PgPool, identity: &Identity) -> AppResult<Member> {
        let user = UserRepository::find_by_id(pool, &identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Self::load_member(pool, user).await
    }

    /// Replace the caller's password after checking the current one
    pub async fn change_password(
        pool: &PgPool,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = UserRepository::find_by_id(pool, &identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !Self::verify_password(current_password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let password_hash = Self::hash_password(new_password)?;
        UserRepository::update_password(pool, &user.id, &password_hash).await?;

        info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign an access token for a user, returning it with its lifetime in seconds
    pub fn issue_access_token(
        user_id: &Uuid,
        username: &str,
        role: Role,
        config: &Config,
    ) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    async fn issue_tokens(
        mut redis: MultiplexedConnection,
        config: &Config,
        user: &User,
    ) -> AppResult<TokenPair> {
        let (access_token, expires_in) =
            Self::issue_access_token(&user.id, &user.username, user.role, config)?;
        let refresh_token = generate_secure_token(REFRESH_TOKEN_LENGTH);

        // Only the digest is stored, so a Redis dump does not leak usable tokens.
        let digest = hash_string(&refresh_token);
        let expiry = (config.jwt.refresh_token_expiry_days * 24 * 60 * 60) as u64;
        let set_key = Self::user_tokens_key(&user.id);

        redis
            .set_ex::<_, _, ()>(format!("refresh_token:{}", digest), user.id.to_string(), expiry)
            .await?;
        redis.sadd::<_, _, ()>(&set_key, &digest).await?;
        redis.expire::<_, ()>(&set_key, expiry as i64).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in,
        })
    }

    async fn load_member(pool: &PgPool, user: User) -> AppResult<Member> {
        let profile = match user.role {
            Role::Student => Profile::Student(
                StudentRepository::find(pool, &user.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?,
            ),
            Role::Staff => Profile::Staff(
                UserRepository::find_staff_profile(pool, &user.id)
                    .await?
                    .unwrap_or(StaffProfile {
                        user_id: user.id,
                        staff_code: None,
                    }),
            ),
        };

        Ok(Member { user, profile })
    }

    fn refresh_key(token: &str) -> String {
        format!("refresh_token:{}", hash_string(token))
    }

    fn user_tokens_key(user_id: &Uuid) -> String {
        format!("refresh_tokens:{}", user_id)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DatabaseConfig, JwtConfig, LogFormat, RedisConfig, ServerConfig, SessionConfig,
    };

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                rust_log: "info".into(),
                log_format: LogFormat::Text,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/unused".into(),
                max_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".into(),
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                expiry_hours: 1,
                refresh_token_expiry_days: 1,
            },
            session: SessionConfig {
                cookie_name: "access_token".into(),
                secure: false,
            },
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let (token, expires_in) =
            AuthService::issue_access_token(&user_id, "zara", Role::Student, &config).unwrap();

        assert_eq!(expires_in, 3600);
        let claims = AuthService::verify_token(&token, &config.jwt.secret).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "zara");
        assert_eq!(claims.role, Role::Student);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let (token, _) =
            AuthService::issue_access_token(&Uuid::new_v4(), "omar", Role::Staff, &config).unwrap();

        let err = AuthService::verify_token(&token, "another-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }
}
