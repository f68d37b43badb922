//! Fintrack backend: HTTP authentication surface for a personal-finance
//! service.
//!
//! Exposes `register`, `login`, `me` (read/delete), and `logout`, delegating
//! persistence to the user directory and credential verification to the token
//! service, both injected through [`state::AppState`].

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

use axum::{Extension, Router, response::Json, routing::get};
use state::AppState;

/// Builds the application router with the given dependencies.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .layer(Extension(state))
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Fintrack Backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
