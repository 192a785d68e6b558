//! Urgency classification client
//!
//! Task wording is sent to an external text-analysis endpoint and the
//! returned label becomes the task's urgency. The endpoint is an opaque
//! dependency: no retries, no timeout policy beyond the HTTP client's own,
//! and any failure aborts the mutation that needed the label.
//!
//! The trait seam exists so the UI can run against a canned classifier in
//! tests and demos without a network.
//!
//! # Wire contract
//!
//! Request: `POST {url}` with `{"title": "...", "description": "..." | null}`
//! Response: `{"urgency": "low" | "medium" | "high"}`
//!
//! # Example
//!
//! ```no_run
//! use tasksense_client::classify::{HttpClassifier, TaskClassifier};
//! use tasksense_client::config::ClassifierConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let classifier = HttpClassifier::new(&ClassifierConfig {
//!     url: "https://classify.example.com/analyze-task".to_string(),
//!     api_key: None,
//! });
//!
//! let urgency = classifier.classify("Pay rent", Some("due monthly")).await?;
//! println!("urgency: {}", urgency.as_str());
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tasksense_shared::models::task::Urgency;

use crate::config::ClassifierConfig;
use crate::error::{ClientError, ClientResult};

/// Assigns an urgency to task wording
#[async_trait]
pub trait TaskClassifier: Send + Sync {
    /// Classifies a title and optional description
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Classification` when the endpoint is
    /// unreachable, answers with an error, or returns an unknown label.
    async fn classify(&self, title: &str, description: Option<&str>) -> ClientResult<Urgency>;
}

/// Request body sent to the classification endpoint
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    title: &'a str,
    description: Option<&'a str>,
}

/// Response body returned by the classification endpoint
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    urgency: Urgency,
}

/// Classifier backed by the configured HTTP endpoint
pub struct HttpClassifier {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpClassifier {
    /// Creates a classifier from configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        HttpClassifier {
            http: reqwest::Client::new(),
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl TaskClassifier for HttpClassifier {
    async fn classify(&self, title: &str, description: Option<&str>) -> ClientResult<Urgency> {
        let mut request = self
            .http
            .post(&self.url)
            .json(&ClassifyRequest { title, description });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Classification(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Classification(format!(
                "endpoint answered {}",
                response.status()
            )));
        }

        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|err| ClientError::Classification(err.to_string()))?;

        tracing::debug!(urgency = body.urgency.as_str(), "classified task wording");
        Ok(body.urgency)
    }
}

/// Canned classifier for tests and demos
///
/// Returns a fixed urgency (or a fixed failure) and counts invocations, so
/// tests can assert exactly when classification happens: on create, on a
/// wording change, and never on a status-only change.
pub struct MockClassifier {
    urgency: Urgency,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockClassifier {
    /// Creates a mock that always returns the given urgency
    pub fn returning(urgency: Urgency) -> Self {
        MockClassifier {
            urgency,
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that always fails
    pub fn failing() -> Self {
        MockClassifier {
            urgency: Urgency::Medium,
            should_fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `classify` was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskClassifier for MockClassifier {
    async fn classify(&self, _title: &str, _description: Option<&str>) -> ClientResult<Urgency> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(ClientError::Classification(
                "mock classifier set to fail".to_string(),
            ));
        }
        Ok(self.urgency)
    }
}
