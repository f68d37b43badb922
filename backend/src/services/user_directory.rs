//! User directory: persistence and credential checks for user accounts.
//!
//! The `UserDirectory` trait is the seam the auth handlers are built against;
//! the SQLite implementation delegates storage to `UserRepository` and checks
//! credentials with bcrypt. Handlers forward directory replies to clients
//! verbatim, so lookup failures are reported as errors rather than shaped
//! into HTTP statuses here.

use crate::auth::models::AuthResult;
use crate::database::models::{NewUserRecord, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::crypto;
use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::SqlitePool;

/// External collaborator responsible for persisting and retrieving users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Persist a new user record.
    async fn create(&self, record: NewUserRecord) -> ServiceResult<Value>;

    /// Check credentials for an email/password pair. Bad credentials are an
    /// error-carrying `AuthResult`, not an `Err`: the distinction between
    /// "authentication failed" and "the directory itself failed" matters to
    /// the login handler.
    async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<AuthResult>;

    /// Fetch a user by id.
    async fn fetch_by_id(&self, id: &str) -> ServiceResult<Value>;

    /// Delete a user by id.
    async fn delete_by_id(&self, id: &str) -> ServiceResult<Value>;
}

/// SQLite-backed directory implementation.
pub struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn user_reply(user: &User) -> ServiceResult<Value> {
        serde_json::to_value(user)
            .map_err(|e| ServiceError::internal(format!("User serialization failed: {}", e)))
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn create(&self, record: NewUserRecord) -> ServiceResult<Value> {
        let repo = UserRepository::new(&self.pool);

        if repo.email_exists(&record.email).await? {
            return Err(ServiceError::already_exists("User", &record.email));
        }

        let user = repo.create_user(record).await?;
        tracing::info!("Registered user {} ({})", user.id, user.email);

        Self::user_reply(&user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<AuthResult> {
        let repo = UserRepository::new(&self.pool);

        let Some(user) = repo.get_user_by_email(email).await? else {
            // Uniform message for unknown email and bad password alike.
            return Ok(AuthResult::failure("Invalid email or password"));
        };

        if !crypto::verify_password(password, &user.password_hash)? {
            return Ok(AuthResult::failure("Invalid email or password"));
        }

        Ok(AuthResult::identified(&user))
    }

    async fn fetch_by_id(&self, id: &str) -> ServiceResult<Value> {
        let repo = UserRepository::new(&self.pool);

        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        Self::user_reply(&user)
    }

    async fn delete_by_id(&self, id: &str) -> ServiceResult<Value> {
        let repo = UserRepository::new(&self.pool);

        if !repo.delete_user(id).await? {
            return Err(ServiceError::not_found("User", id));
        }

        tracing::info!("Deleted user {}", id);
        Ok(json!({ "deleted": id }))
    }
}
