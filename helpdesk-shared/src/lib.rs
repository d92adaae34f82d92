//! # Helpdesk Shared Library
//!
//! Types, persistence and business logic shared by the helpdesk API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, JWT, request authentication and permission checks
//! - `db`: Connection pool and embedded migrations
//! - `models`: Database models (users, queues, user-queue assignments)
//! - `services`: User administration use cases behind the `UserStore` seam

pub mod auth;
pub mod db;
pub mod models;
pub mod services;

/// Current version of the helpdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
