//! # TaskDash Shared Library
//!
//! This crate contains the types and business logic shared between the
//! TaskDash API server and the dashboard client.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, tasks) and their CRUD operations
//! - `auth`: Password hashing, JWT issuance/validation, auth middleware types
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskDash shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
