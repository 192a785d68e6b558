//! Common test utilities for client integration tests
//!
//! Every test runs against a wiremock server standing in for the remote
//! task service, with the session file parked in a temp directory.

use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tasksense_client::config::{ClassifierConfig, Config, ServiceConfig};
use tasksense_client::ServiceClient;
use tasksense_shared::models::user::Session;

/// Public API key the test client is configured with
pub const TEST_ANON_KEY: &str = "test-anon-key";

/// Mock service plus a client pointed at it
pub struct TestContext {
    pub server: MockServer,
    pub client: ServiceClient,
    pub config: Config,
    _dir: TempDir,
}

impl TestContext {
    /// Starts a mock server and builds a client against it
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("temp dir");

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
        let client = ServiceClient::new(&config);

        TestContext {
            server,
            client,
            config,
            _dir: dir,
        }
    }
}

/// Canned token grant body in the auth service's shape
pub fn grant_body(email: &str, access: &str, refresh: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": expires_in,
        "refresh_token": refresh,
        "user": {
            "id": Uuid::new_v4(),
            "email": email,
            "aud": "authenticated",
            "role": "authenticated"
        }
    })
}

/// Canned task row in the table service's shape
pub fn task_row(id: Uuid, title: &str, status: &str, urgency: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": Uuid::new_v4(),
        "title": title,
        "description": null,
        "status": status,
        "urgency": urgency,
        "created_at": "2024-05-01T09:00:00+00:00",
        "due_date": null
    })
}

/// Mounts a password grant expectation answering with `body`
pub async fn mount_password_grant(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", TEST_ANON_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Signs the context's client in with an hour-long token
pub async fn sign_in(ctx: &TestContext) -> Session {
    mount_password_grant(
        &ctx.server,
        grant_body("morgan@example.com", "access-1", "refresh-1", 3600),
    )
    .await;

    ctx.client
        .sign_in("morgan@example.com", "hunter2!")
        .await
        .expect("sign in against mock")
}
