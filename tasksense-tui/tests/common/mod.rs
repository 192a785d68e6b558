//! Shared fixtures for the TUI integration tests.
//!
//! Each test gets a wiremock server standing in for the task service plus a
//! real `ServiceClient` pointed at it, with the session persisted to a
//! temporary directory.

use std::sync::Arc;

use serde_json::{json, Value};
use tasksense_client::config::{ClassifierConfig, Config, ServiceConfig};
use tasksense_client::ServiceClient;
use tasksense_shared::models::user::Session;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_ANON_KEY: &str = "test-anon-key";
pub const TEST_EMAIL: &str = "morgan@example.com";

pub struct TestContext {
    pub server: MockServer,
    pub client: Arc<ServiceClient>,
    pub config: Config,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config {
            service: ServiceConfig {
                url: server.uri(),
                anon_key: TEST_ANON_KEY.to_string(),
            },
            classifier: ClassifierConfig {
                url: format!("{}/classify", server.uri()),
                api_key: None,
            },
            session_file: dir.path().join("session.json"),
            log_file: None,
        };
        let client = Arc::new(ServiceClient::new(&config));
        TestContext {
            server,
            client,
            config,
            _dir: dir,
        }
    }
}

pub fn grant_body(email: &str, user_id: Uuid, access: &str, refresh: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": expires_in,
        "refresh_token": refresh,
        "user": {
            "id": user_id,
            "email": email,
            "aud": "authenticated",
            "role": "authenticated"
        }
    })
}

pub fn task_row(id: Uuid, user_id: Uuid, title: &str, status: &str, urgency: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "title": title,
        "description": null,
        "status": status,
        "urgency": urgency,
        "created_at": "2026-08-20T10:00:00Z",
        "due_date": null
    })
}

pub async fn mount_task_list(server: &MockServer, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

/// Mounts a password grant and signs the context's client in.
pub async fn sign_in(ctx: &TestContext, user_id: Uuid) -> Session {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body(
            TEST_EMAIL,
            user_id,
            "access-1",
            "refresh-1",
            3600,
        )))
        .mount(&ctx.server)
        .await;

    ctx.client
        .sign_in(TEST_EMAIL, "secret-password")
        .await
        .expect("sign in")
}
