//! Error handling for the service client
//!
//! This module provides the unified error type returned by every remote
//! operation. The UI surfaces these as dismissible notices; nothing here
//! aborts the application.
//!
//! # Example
//!
//! ```
//! use tasksense_client::error::{ClientError, ClientResult};
//!
//! fn require_session(token: Option<&str>) -> ClientResult<&str> {
//!     token.ok_or(ClientError::NotAuthenticated)
//! }
//!
//! assert!(require_session(None).is_err());
//! ```

use serde::Deserialize;

/// Client error types
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No session is active for an operation that requires one
    #[error("Not signed in")]
    NotAuthenticated,

    /// The auth service rejected a credential operation
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The task service answered with a non-success status
    #[error("Service error ({status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// The request never completed (connection refused, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Unexpected response from service: {0}")]
    Decode(String),

    /// The classification service failed or returned an unknown label
    #[error("Classification failed: {0}")]
    Classification(String),

    /// Reading or writing the persisted session failed
    #[error("Session storage error: {0}")]
    SessionStorage(String),
}

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body returned by the auth and table services
///
/// The two services disagree on the field carrying the human-readable
/// message, so all known spellings are captured and tried in order.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    /// Table service spelling
    pub message: Option<String>,

    /// Auth service spelling
    pub msg: Option<String>,

    /// OAuth-style spelling used by token grant failures
    pub error_description: Option<String>,

    /// OAuth-style error code, used as a last resort
    pub error: Option<String>,
}

impl ServiceErrorBody {
    /// First populated message field, most specific spelling first
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}
