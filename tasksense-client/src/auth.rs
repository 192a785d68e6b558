//! Authentication operations
//!
//! Sign-up, sign-in, sign-out, and session queries against the auth half of
//! the remote service. Token grants are normalized into the shared
//! [`Session`] type and pushed through the session store, so subscribers
//! see every auth state change no matter which operation caused it.
//!
//! # Token lifecycle
//!
//! ```text
//! sign_in / sign_up ──> session active ──> access token expires
//!                            │                    │
//!                       sign_out            refresh grant
//!                            │              ok ──> session active
//!                       signed out          rejected ──> signed out
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use tasksense_shared::models::user::{Session, User};

use crate::client::ServiceClient;
use crate::error::{ClientError, ClientResult};

/// Access token lifetime assumed when the grant carries no expiry
const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;

/// Result of a sign-up request
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Account created and signed in right away
    SessionEstablished(Session),

    /// Account created; the user must confirm their email before signing in
    ConfirmationRequired(User),
}

/// Credentials body shared by sign-up and password sign-in
#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Refresh grant request body
#[derive(Debug, Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

/// Token grant response from the auth service
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,

    /// Lifetime in seconds, used when `expires_at` is absent
    expires_in: Option<i64>,

    /// Unix timestamp of expiry
    expires_at: Option<i64>,

    refresh_token: String,

    user: User,
}

impl TokenGrant {
    /// Normalizes the grant into a session with an absolute expiry
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let lifetime = self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECONDS);
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or(now + Duration::seconds(lifetime));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Sign-up response: either a full token grant (auto-confirm on) or just
/// the created user (email confirmation pending)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Granted(TokenGrant),
    Registered(User),
}

impl ServiceClient {
    /// Registers a new account
    ///
    /// Depending on service policy the account is either usable immediately
    /// (a session is established and broadcast) or held until the user
    /// confirms their email address.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` when the service rejects the credentials,
    /// e.g. for an already-registered email.
    pub async fn sign_up(&self, email: &str, password: &str) -> ClientResult<SignUpOutcome> {
        let response = self
            .public_request(self.http.post(self.auth_endpoint("signup")))
            .json(&CredentialsBody { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }

        match Self::decode::<SignUpResponse>(response).await? {
            SignUpResponse::Granted(grant) => {
                let session = grant.into_session(Utc::now());
                self.sessions.set(Some(session.clone()))?;
                tracing::info!(user = %session.user.email, "signed up and signed in");
                Ok(SignUpOutcome::SessionEstablished(session))
            }
            SignUpResponse::Registered(user) => {
                tracing::info!(user = %user.email, "signed up, confirmation pending");
                Ok(SignUpOutcome::ConfirmationRequired(user))
            }
        }
    }

    /// Signs in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        let response = self
            .public_request(self.http.post(self.auth_endpoint("token")))
            .query(&[("grant_type", "password")])
            .json(&CredentialsBody { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }

        let grant: TokenGrant = Self::decode(response).await?;
        let session = grant.into_session(Utc::now());
        self.sessions.set(Some(session.clone()))?;
        tracing::info!(user = %session.user.email, "signed in");
        Ok(session)
    }

    /// Signs out, revoking the session server-side
    ///
    /// The local session is cleared whether or not revocation succeeds; an
    /// unreachable server must not trap the user in a signed-in UI. A
    /// revocation failure is still reported so it can be shown as a notice.
    pub async fn sign_out(&self) -> ClientResult<()> {
        let session = match self.sessions.current() {
            Some(session) => session,
            None => return Ok(()),
        };

        let result = self
            .public_request(self.http.post(self.auth_endpoint("logout")))
            .bearer_auth(&session.access_token)
            .send()
            .await;

        self.sessions.set(None)?;
        tracing::info!(user = %session.user.email, "signed out");

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(Self::auth_error(response).await),
            Err(err) => Err(ClientError::Transport(err)),
        }
    }

    /// Returns the active session, refreshing the access token if expired
    ///
    /// `Ok(None)` means signed out. An expired session whose refresh token
    /// is rejected also ends up signed out rather than erroring, since
    /// nothing the caller can do would revive it.
    pub async fn get_session(&self) -> ClientResult<Option<Session>> {
        let session = match self.sessions.current() {
            Some(session) => session,
            None => return Ok(None),
        };

        if !session.is_expired(Utc::now()) {
            return Ok(Some(session));
        }

        match self.refresh_session(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(ClientError::Auth(reason)) => {
                tracing::info!(%reason, "refresh token rejected, signing out");
                self.sessions.set(None)?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetches the user behind the active session from the auth service
    ///
    /// Round-trips to the server so a deleted or disabled account is
    /// noticed; the locally cached user is not trusted for writes.
    pub async fn get_user(&self) -> ClientResult<User> {
        let request = self.authorized(self.http.get(self.auth_endpoint("user"))).await?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        Self::decode(response).await
    }

    /// Restores a persisted session from disk at startup
    ///
    /// A still-valid session is activated and broadcast; an expired one is
    /// refreshed first. Every failure path lands on "signed out" instead of
    /// an error, so a stale file or unreachable server still brings up the
    /// sign-in view.
    pub async fn restore_session(&self) -> Option<Session> {
        let stored = match self.sessions.load() {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "could not read persisted session");
                return None;
            }
        };

        if !stored.is_expired(Utc::now()) {
            if let Err(err) = self.sessions.set(Some(stored.clone())) {
                tracing::warn!(error = %err, "could not re-persist restored session");
            }
            tracing::debug!(user = %stored.user.email, "restored persisted session");
            return Some(stored);
        }

        match self.refresh_session(&stored.refresh_token).await {
            Ok(session) => {
                tracing::debug!(user = %session.user.email, "refreshed persisted session");
                Some(session)
            }
            Err(err) => {
                tracing::info!(error = %err, "persisted session could not be refreshed");
                let _ = self.sessions.set(None);
                None
            }
        }
    }

    /// Subscribes to auth state changes
    ///
    /// The receiver starts at the current state and is notified on every
    /// sign-in, refresh, and sign-out. Dropping it ends the subscription.
    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    /// Session currently held in memory, without an expiry check
    pub fn current_session(&self) -> Option<Session> {
        self.sessions.current()
    }

    /// Session for an authorized request, or `NotAuthenticated`
    pub(crate) async fn active_session(&self) -> ClientResult<Session> {
        self.get_session()
            .await?
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Exchanges a refresh token for a new session and activates it
    async fn refresh_session(&self, refresh_token: &str) -> ClientResult<Session> {
        let response = self
            .public_request(self.http.post(self.auth_endpoint("token")))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshBody { refresh_token })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }

        let grant: TokenGrant = Self::decode(response).await?;
        let session = grant.into_session(Utc::now());
        self.sessions.set(Some(session.clone()))?;
        Ok(session)
    }
}
