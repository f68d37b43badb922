//! Database repositories for the backend entities.

pub mod user_repository;
