//! # TaskSense Service Client
//!
//! This library talks to the two remote dependencies of the TaskSense app:
//! the hosted task service (auth endpoints plus a row-level-secured `tasks`
//! table) and the urgency classification endpoint.
//!
//! ## Modules
//!
//! - `client`: `ServiceClient` construction and request plumbing
//! - `auth`: Sign-up, sign-in, sign-out, session restore and subscription
//! - `tasks`: Task row operations (list, insert, patch, delete)
//! - `classify`: Urgency classification trait, HTTP and mock implementations
//! - `session`: Session store with change notification and file persistence
//! - `config`: Environment-driven configuration
//! - `error`: Unified client error type

pub mod auth;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod tasks;

pub use auth::SignUpOutcome;
pub use client::ServiceClient;
pub use error::{ClientError, ClientResult};
