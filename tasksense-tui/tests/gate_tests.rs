//! Screen gate tests: the dashboard is shown exactly when a session is
//! present, the auth screen otherwise. Sign-in, restore and sign-out all
//! drive the gate through the session subscription.

mod common;

use std::sync::Arc;

use common::{grant_body, mount_task_list, sign_in, task_row, TestContext, TEST_EMAIL};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tasksense_client::classify::{MockClassifier, TaskClassifier};
use tasksense_client::ServiceClient;
use tasksense_shared::models::task::Urgency;
use tasksense_tui::app::{App, Screen};
use tasksense_tui::auth::AuthMode;
use tasksense_tui::notify::NoticeLevel;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn test_app(ctx: &TestContext) -> App {
    let classifier: Arc<dyn TaskClassifier> = Arc::new(MockClassifier::returning(Urgency::Low));
    App::new(ctx.client.clone(), classifier)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[tokio::test]
async fn test_fresh_start_lands_on_auth() {
    let ctx = TestContext::new().await;
    let mut app = test_app(&ctx);
    assert_eq!(app.screen, Screen::Loading);

    app.bootstrap().await;

    assert_eq!(app.screen, Screen::Auth);
    assert!(app.dashboard.is_none());
}

#[tokio::test]
async fn test_persisted_session_restores_straight_to_dashboard() {
    let ctx = TestContext::new().await;
    let user_id = Uuid::new_v4();
    sign_in(&ctx, user_id).await;

    mount_task_list(
        &ctx.server,
        json!([task_row(Uuid::new_v4(), user_id, "Write the brief", "pending", "low")]),
    )
    .await;

    // A second client sees only the persisted session file.
    let client = Arc::new(ServiceClient::new(&ctx.config));
    let classifier: Arc<dyn TaskClassifier> = Arc::new(MockClassifier::returning(Urgency::Low));
    let mut app = App::new(client, classifier);
    app.bootstrap().await;

    assert_eq!(app.screen, Screen::Dashboard);
    let dashboard = app.dashboard.as_ref().unwrap();
    assert_eq!(dashboard.user.email, TEST_EMAIL);
    assert_eq!(dashboard.tasks.len(), 1);
}

#[tokio::test]
async fn test_sign_in_flow_opens_dashboard() {
    let ctx = TestContext::new().await;
    let user_id = Uuid::new_v4();
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
    mount_task_list(&ctx.server, json!([])).await;

    let mut app = test_app(&ctx);
    app.bootstrap().await;

    for c in TEST_EMAIL.chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
    app.handle_key(key(KeyCode::Tab)).await;
    for c in "secret-password".chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
    app.handle_key(key(KeyCode::Enter)).await;
    app.on_tick().await;

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(
        app.dashboard.as_ref().unwrap().user.email,
        TEST_EMAIL
    );
}

#[tokio::test]
async fn test_failed_sign_in_stays_on_auth_with_notice() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&ctx.server)
        .await;

    let mut app = test_app(&ctx);
    app.bootstrap().await;
    app.auth.email = TEST_EMAIL.to_string();
    app.auth.password = "wrong".to_string();
    app.handle_key(key(KeyCode::Enter)).await;
    app.on_tick().await;

    assert_eq!(app.screen, Screen::Auth);
    let notice = app.notices.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.text.contains("Invalid login credentials"));
}

#[tokio::test]
async fn test_sign_up_confirmation_keeps_auth_mode() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": Uuid::new_v4(),
            "email": TEST_EMAIL,
            "aud": "authenticated",
            "role": ""
        })))
        .mount(&ctx.server)
        .await;

    let mut app = test_app(&ctx);
    app.bootstrap().await;
    app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
        .await;
    assert_eq!(app.auth.mode, AuthMode::SignUp);

    app.auth.email = TEST_EMAIL.to_string();
    app.auth.password = "secret-password".to_string();
    app.handle_key(key(KeyCode::Enter)).await;
    app.on_tick().await;

    // No session was granted, so the gate stays put.
    assert_eq!(app.screen, Screen::Auth);
    assert_eq!(app.auth.mode, AuthMode::SignUp);
    assert!(app.auth.password.is_empty());
    let notice = app.notices.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(notice.text.contains("Check your email"));
}

#[tokio::test]
async fn test_sign_out_returns_to_auth() {
    let ctx = TestContext::new().await;
    let user_id = Uuid::new_v4();
    sign_in(&ctx, user_id).await;
    mount_task_list(&ctx.server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.server)
        .await;

    let mut app = test_app(&ctx);
    app.bootstrap().await;
    assert_eq!(app.screen, Screen::Dashboard);

    app.handle_key(key(KeyCode::Char('o'))).await;
    app.on_tick().await;

    assert_eq!(app.screen, Screen::Auth);
    assert!(app.dashboard.is_none());
}

#[tokio::test]
async fn test_form_keys_open_and_close_modal() {
    let ctx = TestContext::new().await;
    let user_id = Uuid::new_v4();
    sign_in(&ctx, user_id).await;
    mount_task_list(&ctx.server, json!([])).await;

    let mut app = test_app(&ctx);
    app.bootstrap().await;

    app.handle_key(key(KeyCode::Char('n'))).await;
    assert!(app.dashboard.as_ref().unwrap().form.is_some());

    for c in "Buy milk".chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
    assert_eq!(app.dashboard.as_ref().unwrap().form.as_ref().unwrap().title, "Buy milk");

    app.handle_key(key(KeyCode::Esc)).await;
    assert!(app.dashboard.as_ref().unwrap().form.is_none());
}
