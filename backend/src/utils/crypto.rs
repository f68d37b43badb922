//! Password hashing and session-token derivation.
//!
//! Both use bcrypt: passwords with a moderate work factor before they are
//! persisted, session tokens with the cheapest allowed factor since they only
//! need to be irreversible, not expensive to produce.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};

/// Work factor for stored password hashes.
pub const PASSWORD_WORK_FACTOR: u32 = 9;

/// Work factor for the `sessionid` value derived at login. bcrypt rejects
/// costs below 4, so this is the floor.
pub const SESSION_WORK_FACTOR: u32 = 4;

/// Hashes a password before it is stored.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, PASSWORD_WORK_FACTOR)
        .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
}

/// Verifies a password against the stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
    verify(password, password_hash)
        .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
}

/// Derives the one-way session token handed out in the `sessionid` header.
/// The token is a salted hash of the user id; it cannot be reversed and is
/// never stored or validated server-side.
pub fn derive_session_token(user_id: &str) -> ServiceResult<String> {
    hash(user_id, SESSION_WORK_FACTOR)
        .map_err(|e| ServiceError::internal(format!("Session token derivation failed: {}", e)))
}
