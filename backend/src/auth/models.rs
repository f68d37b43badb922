//! Data structures for authentication-related requests and responses.

use crate::database::models::User;
use serde::{Deserialize, Serialize};

/// Registration request payload.
///
/// Every field is optional at the serde layer: absence is reported by the
/// handler's own 400 response, not by a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request payload.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outcome of an authentication attempt.
///
/// Either `error` is set, or the identity fields are. The login handler sends
/// this back with status 200 in both cases; only the presence of `error`
/// decides whether a session header and access token are attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl AuthResult {
    /// An authentication failure carrying only the error indicator.
    pub fn failure(message: impl Into<String>) -> Self {
        AuthResult {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// A successful authentication for the given user.
    pub fn identified(user: &User) -> Self {
        AuthResult {
            error: None,
            id: Some(user.id.clone()),
            name: Some(user.name.clone()),
            lastname: Some(user.lastname.clone()),
            email: Some(user.email.clone()),
            access_token: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Query parameters naming the user a `/me` request targets.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
