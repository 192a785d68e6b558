//! # TaskSense Shared Library
//!
//! This crate contains the domain types and pure business logic shared by the
//! TaskSense service client and terminal UI.
//!
//! ## Module Organization
//!
//! - `models`: Task, user, and session data structures
//! - `filter`: Client-side task filtering
//! - `stats`: Aggregate task counts for the dashboard

pub mod filter;
pub mod models;
pub mod stats;

/// Current version of the TaskSense shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
