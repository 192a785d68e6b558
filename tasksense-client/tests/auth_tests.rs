//! Integration tests for the auth operations
//!
//! These verify the wire contract against a mock service:
//! - Credential grants carry the public API key and exact JSON bodies
//! - Token grants become sessions, broadcast and persisted
//! - Expired sessions are refreshed transparently; rejected refreshes sign out
//! - Sign-out clears local state even when revocation fails

mod common;

use common::{grant_body, mount_password_grant, sign_in, TestContext, TEST_ANON_KEY};
use serde_json::json;
use tasksense_client::{ClientError, ServiceClient, SignUpOutcome};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_sign_in_establishes_session() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", TEST_ANON_KEY))
        .and(body_json(json!({
            "email": "morgan@example.com",
            "password": "hunter2!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body(
            "morgan@example.com",
            "access-1",
            "refresh-1",
            3600,
        )))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let session = ctx
        .client
        .sign_in("morgan@example.com", "hunter2!")
        .await
        .unwrap();

    assert_eq!(session.access_token, "access-1");
    assert_eq!(session.user.email, "morgan@example.com");
    assert_eq!(ctx.client.current_session(), Some(session));
    assert!(ctx.config.session_file.exists());
}

#[tokio::test]
async fn test_sign_in_with_wrong_password_surfaces_message() {
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

    let err = ctx
        .client
        .sign_in("morgan@example.com", "wrong")
        .await
        .unwrap_err();

    match err {
        ClientError::Auth(message) => assert_eq!(message, "Invalid login credentials"),
        other => panic!("expected auth error, got {other:?}"),
    }
    assert_eq!(ctx.client.current_session(), None);
}

#[tokio::test]
async fn test_sign_up_with_confirmation_pending() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(header("apikey", TEST_ANON_KEY))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "hunter2!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": Uuid::new_v4(),
            "email": "new@example.com",
            "confirmation_sent_at": "2024-05-01T12:00:00Z"
        })))
        .mount(&ctx.server)
        .await;

    let outcome = ctx
        .client
        .sign_up("new@example.com", "hunter2!")
        .await
        .unwrap();

    match outcome {
        SignUpOutcome::ConfirmationRequired(user) => assert_eq!(user.email, "new@example.com"),
        other => panic!("expected pending confirmation, got {other:?}"),
    }
    // No session until the email is confirmed and the user signs in
    assert_eq!(ctx.client.current_session(), None);
}

#[tokio::test]
async fn test_sign_up_with_auto_confirm_signs_in() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body(
            "new@example.com",
            "access-1",
            "refresh-1",
            3600,
        )))
        .mount(&ctx.server)
        .await;

    let outcome = ctx
        .client
        .sign_up("new@example.com", "hunter2!")
        .await
        .unwrap();

    assert!(matches!(outcome, SignUpOutcome::SessionEstablished(_)));
    assert!(ctx.client.current_session().is_some());
}

#[tokio::test]
async fn test_duplicate_sign_up_surfaces_message() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "User already registered"
        })))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .client
        .sign_up("taken@example.com", "hunter2!")
        .await
        .unwrap_err();

    match err {
        ClientError::Auth(message) => assert_eq!(message, "User already registered"),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_out_clears_session_even_when_revocation_fails() {
    let ctx = TestContext::new().await;
    sign_in(&ctx).await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "msg": "boom" })))
        .mount(&ctx.server)
        .await;

    let result = ctx.client.sign_out().await;

    assert!(result.is_err(), "revocation failure should be reported");
    assert_eq!(ctx.client.current_session(), None);
    assert!(!ctx.config.session_file.exists());
}

#[tokio::test]
async fn test_sign_out_when_signed_out_is_a_no_op() {
    let ctx = TestContext::new().await;

    ctx.client.sign_out().await.unwrap();

    let requests = ctx.server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no request should be sent");
}

#[tokio::test]
async fn test_expired_session_is_refreshed_before_requests() {
    let ctx = TestContext::new().await;

    // Token expires inside the refresh leeway right away
    mount_password_grant(
        &ctx.server,
        grant_body("morgan@example.com", "access-1", "refresh-1", 5),
    )
    .await;
    ctx.client
        .sign_in("morgan@example.com", "hunter2!")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body(
            "morgan@example.com",
            "access-2",
            "refresh-2",
            3600,
        )))
        .expect(1)
        .mount(&ctx.server)
        .await;

    // The list call only matches with the refreshed token
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let tasks = ctx.client.list_tasks().await.unwrap();
    assert!(tasks.is_empty());

    let session = ctx.client.current_session().unwrap();
    assert_eq!(session.access_token, "access-2");
    assert_eq!(session.refresh_token, "refresh-2");
}

#[tokio::test]
async fn test_rejected_refresh_signs_out() {
    let ctx = TestContext::new().await;

    mount_password_grant(
        &ctx.server,
        grant_body("morgan@example.com", "access-1", "refresh-1", 5),
    )
    .await;
    ctx.client
        .sign_in("morgan@example.com", "hunter2!")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Session expired"
        })))
        .mount(&ctx.server)
        .await;

    let session = ctx.client.get_session().await.unwrap();
    assert_eq!(session, None);
    assert_eq!(ctx.client.current_session(), None);
}

#[tokio::test]
async fn test_get_user_round_trips_to_the_service() {
    let ctx = TestContext::new().await;
    let session = sign_in(&ctx).await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("apikey", TEST_ANON_KEY))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": session.user.id,
            "email": "morgan@example.com",
            "role": "authenticated"
        })))
        .mount(&ctx.server)
        .await;

    let user = ctx.client.get_user().await.unwrap();
    assert_eq!(user.id, session.user.id);
    assert_eq!(user.email, "morgan@example.com");
}

#[tokio::test]
async fn test_get_user_without_session_fails_before_network() {
    let ctx = TestContext::new().await;

    let err = ctx.client.get_user().await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));

    let requests = ctx.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_restore_session_resumes_from_disk() {
    let ctx = TestContext::new().await;
    let session = sign_in(&ctx).await;

    // A second client over the same config models a process restart
    let resumed = ServiceClient::new(&ctx.config);
    let restored = resumed.restore_session().await;

    assert_eq!(restored, Some(session.clone()));
    assert_eq!(resumed.current_session(), Some(session));
}

#[tokio::test]
async fn test_restore_session_with_no_file_stays_signed_out() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.client.restore_session().await, None);
    assert_eq!(ctx.client.current_session(), None);
}

#[tokio::test]
async fn test_session_changes_reach_subscribers() {
    let ctx = TestContext::new().await;
    let mut rx = ctx.client.subscribe_session();
    assert!(rx.borrow_and_update().is_none());

    sign_in(&ctx).await;
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_some());

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.server)
        .await;
    ctx.client.sign_out().await.unwrap();

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_none());
}
