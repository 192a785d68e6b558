//! Configuration management for the TaskSense client
//!
//! This module loads configuration from environment variables and provides
//! a type-safe configuration struct shared by the service client, the
//! classifier client, and the terminal binary.
//!
//! # Environment Variables
//!
//! - `TASKSENSE_SERVICE_URL`: Base URL of the task service (required)
//! - `TASKSENSE_SERVICE_KEY`: Public API key sent with every request (required)
//! - `TASKSENSE_CLASSIFIER_URL`: URL of the urgency classification endpoint (required)
//! - `TASKSENSE_CLASSIFIER_KEY`: Bearer token for the classifier (optional)
//! - `TASKSENSE_SESSION_FILE`: Session persistence path (default: `~/.config/tasksense/session.json`)
//! - `TASKSENSE_LOG_FILE`: When set, debug logs are appended to this file
//!
//! # Example
//!
//! ```no_run
//! use tasksense_client::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Talking to {}", config.service.url);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Task service configuration
    pub service: ServiceConfig,

    /// Classification endpoint configuration
    pub classifier: ClassifierConfig,

    /// Where the session is persisted between runs
    pub session_file: PathBuf,

    /// Log destination; logging stays off when unset so the terminal UI
    /// is never written over
    pub log_file: Option<PathBuf>,
}

/// Task service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL, no trailing slash (e.g. `https://tasks.example.com`)
    pub url: String,

    /// Public API key identifying this app to the service
    pub anon_key: String,
}

/// Classification endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Full URL of the classification endpoint
    pub url: String,

    /// Optional bearer token
    pub api_key: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - A URL does not start with `http://` or `https://`
    /// - Neither `TASKSENSE_SESSION_FILE` nor `HOME` is set
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let service_url = env::var("TASKSENSE_SERVICE_URL")
            .map_err(|_| anyhow::anyhow!("TASKSENSE_SERVICE_URL environment variable is required"))?;
        let service_url = normalize_base_url(&service_url)?;

        let anon_key = env::var("TASKSENSE_SERVICE_KEY")
            .map_err(|_| anyhow::anyhow!("TASKSENSE_SERVICE_KEY environment variable is required"))?;

        let classifier_url = env::var("TASKSENSE_CLASSIFIER_URL").map_err(|_| {
            anyhow::anyhow!("TASKSENSE_CLASSIFIER_URL environment variable is required")
        })?;
        let classifier_url = normalize_base_url(&classifier_url)?;

        let classifier_key = env::var("TASKSENSE_CLASSIFIER_KEY").ok();

        let session_file = match env::var("TASKSENSE_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let home = env::var("HOME").map_err(|_| {
                    anyhow::anyhow!("TASKSENSE_SESSION_FILE or HOME must be set")
                })?;
                default_session_file(&home)
            }
        };

        let log_file = env::var("TASKSENSE_LOG_FILE").ok().map(PathBuf::from);

        Ok(Self {
            service: ServiceConfig {
                url: service_url,
                anon_key,
            },
            classifier: ClassifierConfig {
                url: classifier_url,
                api_key: classifier_key,
            },
            session_file,
            log_file,
        })
    }
}

/// Trims trailing slashes and rejects URLs without an HTTP scheme
fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!("URL must start with http:// or https://, got: {}", raw);
    }
    Ok(trimmed.to_string())
}

/// Default session path under the user's home directory
fn default_session_file(home: &str) -> PathBuf {
    Path::new(home)
        .join(".config")
        .join("tasksense")
        .join("session.json")
}
