//! JWT token utilities for authentication.
//!
//! Defines the `TokenService` seam the guard middleware depends on and the
//! HS256 implementation used in production. Keys are injected at construction
//! time so tests and the server wire the same type with different secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// JWT claims attached to authenticated requests.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Check if token has expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now > self.exp
    }
}

/// Issues and verifies the bearer credentials guarding protected routes.
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: &str, email: &str) -> ServiceResult<String>;
    fn verify(&self, token: &str) -> ServiceResult<Claims>;
}

/// HS256 token service backed by jsonwebtoken.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtTokenService {
    /// Create a token service from a shared secret and token lifetime.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtTokenService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in_seconds,
        }
    }
}

impl TokenService for JwtTokenService {
    /// Generate a signed token for an authenticated user.
    fn issue(&self, user_id: &str, email: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a token back into its claims.
    fn verify(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::validation(format!("Token validation failed: {}", e)))
    }
}
