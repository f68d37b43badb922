//! Shared utilities: password hashing and token handling.

pub mod crypto;
pub mod jwt;
