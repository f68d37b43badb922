//! HTTP routes for the authentication surface.
//!
//! Public routes carry no guards; `/me` reads require a valid token, while
//! destructive routes additionally pass the ownership guard. Layer order
//! matters: the token guard must run first so the ownership guard can read
//! the resolved claims.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Creates the authentication router with all auth-related routes.
pub fn auth_router() -> Router {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let token_gated = Router::new()
        .route("/me", get(profile))
        .route_layer(middleware::from_fn(require_token));

    let owner_gated = Router::new()
        .route("/me", delete(remove_profile))
        .route("/logout", get(logout))
        .route_layer(middleware::from_fn(require_owner))
        .route_layer(middleware::from_fn(require_token));

    public.merge(token_gated).merge(owner_gated)
}
