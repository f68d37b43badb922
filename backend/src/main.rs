//! Main entry point for the Fintrack backend.
//!
//! Initializes logging, loads configuration, prepares the database, wires the
//! injected dependencies, and serves the Axum application.

use backend::config::Config;
use backend::database::{Database, MIGRATOR};
use backend::state::AppState;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    MIGRATOR.run(db.pool()).await?;

    let state = AppState::sqlite(db.pool().clone(), &config);
    let app = backend::app(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting Fintrack backend on port {}", config.server_port);
    axum::serve(listener, app).await?;

    Ok(())
}
