//! Global application error types.
//!
//! Defines the service-layer error used across the backend and the
//! `ServiceResult` alias returned by the directory and token layers.

use thiserror::Error;

/// Generic service error shared by all layers above the repositories.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
