//! Shared application state.
//!
//! The handlers and guards depend on the user directory and token service
//! through trait objects injected at startup, never through globals.

use crate::config::Config;
use crate::services::user_directory::{SqliteUserDirectory, UserDirectory};
use crate::utils::jwt::{JwtTokenService, TokenService};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Dependencies injected into the request pipeline.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectory>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    pub fn new(directory: Arc<dyn UserDirectory>, tokens: Arc<dyn TokenService>) -> Self {
        Self { directory, tokens }
    }

    /// Production wiring: SQLite-backed directory plus HS256 tokens from the
    /// configured secret.
    pub fn sqlite(pool: SqlitePool, config: &Config) -> Self {
        Self::new(
            Arc::new(SqliteUserDirectory::new(pool)),
            Arc::new(JwtTokenService::new(
                &config.jwt_secret,
                config.jwt_expires_in_seconds,
            )),
        )
    }
}
