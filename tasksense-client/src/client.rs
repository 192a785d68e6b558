//! Service client construction and request plumbing
//!
//! One `ServiceClient` talks to both halves of the remote service: the auth
//! endpoints under `/auth/v1` and the task rows under `/rest/v1`. Every
//! request carries the public API key; authorized requests additionally
//! carry the active session's bearer token.
//!
//! # Example
//!
//! ```no_run
//! use tasksense_client::client::ServiceClient;
//! use tasksense_client::config::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let client = ServiceClient::new(&config);
//!
//! if client.restore_session().await.is_none() {
//!     client.sign_in("morgan@example.com", "hunter2!").await?;
//! }
//! let tasks = client.list_tasks().await?;
//! println!("{} tasks", tasks.len());
//! # Ok(())
//! # }
//! ```

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ClientError, ClientResult, ServiceErrorBody};
use crate::session::SessionStore;

/// Client for the remote task service
pub struct ServiceClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) sessions: SessionStore,
}

impl ServiceClient {
    /// Creates a client from configuration
    ///
    /// The session store starts signed out; call
    /// [`restore_session`](Self::restore_session) to resume a persisted one.
    pub fn new(config: &Config) -> Self {
        ServiceClient {
            http: reqwest::Client::new(),
            base_url: config.service.url.clone(),
            anon_key: config.service.anon_key.clone(),
            sessions: SessionStore::new(config.session_file.clone()),
        }
    }

    /// URL of an auth endpoint, e.g. `auth_endpoint("signup")`
    pub(crate) fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// URL of the task rows endpoint
    pub(crate) fn tasks_endpoint(&self) -> String {
        format!("{}/rest/v1/tasks", self.base_url)
    }

    /// Attaches the headers carried by every request
    pub(crate) fn public_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.anon_key)
    }

    /// Attaches the public headers plus the active session's bearer token
    ///
    /// Refreshes an expired token first; fails with `NotAuthenticated` when
    /// signed out.
    pub(crate) async fn authorized(&self, builder: RequestBuilder) -> ClientResult<RequestBuilder> {
        let session = self.active_session().await?;
        Ok(self
            .public_request(builder)
            .bearer_auth(session.access_token))
    }

    /// Decodes a success body, reporting shape mismatches as `Decode`
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Turns a non-success table response into `ClientError::Service`
    pub(crate) async fn service_error(response: Response) -> ClientError {
        let (status, message) = Self::error_message(response).await;
        ClientError::Service { status, message }
    }

    /// Turns a non-success auth response into `ClientError::Auth`
    pub(crate) async fn auth_error(response: Response) -> ClientError {
        let (_, message) = Self::error_message(response).await;
        ClientError::Auth(message)
    }

    async fn error_message(response: Response) -> (u16, String) {
        let status = response.status().as_u16();
        let message = response
            .json::<ServiceErrorBody>()
            .await
            .ok()
            .and_then(ServiceErrorBody::into_message)
            .unwrap_or_else(|| "request rejected with no error body".to_string());
        (status, message)
    }
}
