//! Business logic services.

pub mod user_directory;
