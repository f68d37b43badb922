//! Authentication module: request models, handlers, guard middleware, and
//! route assembly for the `/register`, `/login`, `/me`, and `/logout`
//! endpoints.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
