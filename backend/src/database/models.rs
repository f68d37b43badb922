//! Rust structs that represent database table mappings.
//!
//! These models define the structure of user data as it is stored in and
//! retrieved from the database. API-facing request/response models live in
//! `auth::models`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;

/// A persisted user row.
///
/// The password hash never leaves the server: it is skipped during
/// serialization so directory replies can be sent to clients verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub categories: Json<Vec<Value>>,
    pub movements: Json<Vec<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a user about to be created.
///
/// Carries the already-hashed password together with the empty category and
/// movement collections every new user starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRecord {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub categories: Vec<Value>,
    pub movements: Vec<Value>,
}

impl NewUserRecord {
    /// Builds a record for a fresh registration: hashed password in, empty
    /// collections seeded.
    pub fn registration(
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            categories: Vec::new(),
            movements: Vec::new(),
        }
    }
}
