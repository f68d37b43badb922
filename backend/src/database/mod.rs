//! Module for database connection setup and common utilities.
//!
//! Responsible for initializing the SQLite connection pool and exposing the
//! embedded migrations so both the server and the tests can apply the schema.

use crate::config::Config;
use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;

pub mod models;

/// Schema migrations embedded from `migrations/` at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!();

pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Initializes the database connection pool.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.database_url)
            .await?;

        Ok(Database { pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Database {
            pool: self.pool.clone(),
        }
    }
}
