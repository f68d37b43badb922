//! Database repository for user management operations.
//!
//! Provides CRUD operations for user records.

use crate::database::models::{NewUserRecord, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, name, lastname, email, password_hash, categories, movements, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `record` - New user data with the password already hashed
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, record: NewUserRecord) -> Result<User> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now();

        let sql = format!(
            "INSERT INTO users (id, name, lastname, email, password_hash, categories, movements, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&id)
            .bind(&record.name)
            .bind(&record.lastname)
            .bind(&record.email)
            .bind(&record.password_hash)
            .bind(Json(&record.categories))
            .bind(Json(&record.movements))
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Checks if an email already exists in the system.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Deletes a user by their unique identifier.
    ///
    /// # Returns
    /// `true` if a row was removed
    pub async fn delete_user(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
