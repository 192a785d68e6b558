//! User and session models
//!
//! The auth service returns a user object alongside each token grant; the
//! session type here is the normalized form the client persists to disk and
//! broadcasts to session subscribers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID assigned by the auth service
    pub id: Uuid,

    /// Email address the account was registered with
    pub email: String,

    /// When the account was registered; absent on some service responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Short name for greetings: the part of the email before `@`
    pub fn display_name(&self) -> &str {
        match self.email.split_once('@') {
            Some((name, _)) => name,
            None => &self.email,
        }
    }
}

/// Authenticated session issued by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent on every authorized request
    pub access_token: String,

    /// Token exchanged for a fresh access token after expiry
    pub refresh_token: String,

    /// When the access token stops being accepted
    pub expires_at: DateTime<Utc>,

    /// User the session belongs to
    pub user: User,
}

impl Session {
    /// Leeway subtracted from the expiry when deciding whether to refresh,
    /// so a token never expires mid-request
    const EXPIRY_LEEWAY_SECONDS: i64 = 30;

    /// Checks whether the access token is expired or about to expire
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(Self::EXPIRY_LEEWAY_SECONDS) >= self.expires_at
    }
}
