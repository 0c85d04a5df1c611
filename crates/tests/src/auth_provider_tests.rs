use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::gateway::{GatewayError, SessionProvider};

use crate::common::*;

// ── Password sign-in ────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_posts_password_grant() {
    let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "correct horse");
    let client = mock.spawn().await;

    let grant = client.sign_in("ada@uni.test", "correct horse").await.unwrap();

    assert_eq!(grant.access_token, user.access_token);
    assert!(grant.refresh_token.starts_with("refresh-"));
    assert_eq!(grant.expires_in, 3600);
    let identity = grant.user.expect("grant carries the user");
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.email.as_deref(), Some("ada@uni.test"));

    let req = mock.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/auth/v1/token");
    assert_eq!(req.param("grant_type"), Some("password"));
    assert_eq!(
        req.body,
        Some(json!({"email": "ada@uni.test", "password": "correct horse"}))
    );
    assert_eq!(req.header("apikey"), Some(ANON_KEY));
}

#[tokio::test]
async fn wrong_password_is_rejected_with_description() {
    let (mock, _) = MockSupabase::new().with_user("ada@uni.test", "correct horse");
    let client = mock.spawn().await;

    let err = client.sign_in("ada@uni.test", "battery staple").await.unwrap_err();
    assert_eq!(err, GatewayError::rejected(400, "Invalid login credentials"));
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_exchanges_token_once() {
    let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "pw");
    let mock = mock.with_refresh_token("refresh-original", user.id);
    let client = mock.spawn().await;

    let grant = client.refresh("refresh-original").await.unwrap();
    assert_eq!(grant.access_token, user.access_token);
    assert_ne!(grant.refresh_token, "refresh-original");

    let req = mock.last_request();
    assert_eq!(req.param("grant_type"), Some("refresh_token"));
    assert_eq!(req.body, Some(json!({"refresh_token": "refresh-original"})));

    let err = client.refresh("refresh-original").await.unwrap_err();
    assert!(matches!(err, GatewayError::Rejected { status: 400, .. }));
}

// ── Identity and sign-out ───────────────────────────────────────────

#[tokio::test]
async fn identity_uses_bearer_token() {
    let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "pw");
    let client = mock.spawn().await;

    let identity = client.identity(&user.access_token).await.unwrap();
    assert_eq!(identity.id, user.id);

    let req = mock.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/auth/v1/user");
    assert_eq!(
        req.header("authorization"),
        Some(format!("Bearer {}", user.access_token).as_str())
    );
}

#[tokio::test]
async fn unknown_token_is_auth_rejection() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;

    let err = client.identity("forged").await.unwrap_err();
    assert_eq!(err, GatewayError::rejected(401, "invalid JWT"));
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn sign_out_accepts_no_content() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;

    client.sign_out("token-ada@uni.test").await.unwrap();

    let req = mock.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/auth/v1/logout");
}

#[tokio::test]
async fn outage_during_sign_in_is_not_auth_rejection() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;
    mock.force_response(StatusCode::SERVICE_UNAVAILABLE, json!({"message": "maintenance"}));

    let err = client.sign_in("ada@uni.test", "pw").await.unwrap_err();
    assert_eq!(err, GatewayError::rejected(503, "maintenance"));
    assert!(!err.is_auth_rejection());
}
