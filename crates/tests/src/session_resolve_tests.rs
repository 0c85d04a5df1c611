use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::gateway::{GatewayError, MemoryBackend};
use server::session::{resolve_session, sign_in};
use shared_types::{Role, RoleGroup, SessionStatus};

use crate::common::*;

fn profile_row(user: &MockUser, role: serde_json::Value, display_name: &str) -> serde_json::Value {
    json!({
        "id": user.id,
        "display_name": display_name,
        "role": role,
        "email": user.email,
    })
}

// ── Role mapping ────────────────────────────────────────────────────

#[tokio::test]
async fn profile_role_drives_session_role() {
    for (stored, expected) in [
        (json!("student"), Role::Student),
        (json!("lecturer"), Role::Lecturer),
        (json!("admin"), Role::Admin),
        (json!("superadmin"), Role::Superadmin),
        (json!("guest"), Role::Guest),
    ] {
        let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "pw");
        let mock = mock.with_rows("profiles", vec![profile_row(&user, stored.clone(), "Ada")]);
        let client = mock.spawn().await;

        let session = resolve_session(&client, &client, &user.access_token)
            .await
            .unwrap()
            .expect("token is valid");
        assert_eq!(session.role, expected, "stored role {stored}");
        assert_eq!(session.user_id, user.id);
    }
}

#[tokio::test]
async fn unknown_or_null_role_is_guest() {
    for stored in [json!("chancellor"), json!(null)] {
        let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "pw");
        let mock = mock.with_rows("profiles", vec![profile_row(&user, stored, "Ada")]);
        let client = mock.spawn().await;

        let session = resolve_session(&client, &client, &user.access_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.role, Role::Guest);
        assert_eq!(session.role.group(), None);
    }
}

#[tokio::test]
async fn missing_profile_row_is_guest_with_email() {
    let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "pw");
    let client = mock.spawn().await;

    let session = resolve_session(&client, &client, &user.access_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.role, Role::Guest);
    assert_eq!(session.email, "ada@uni.test");
    assert_eq!(session.display_name, "");

    let profile_query = mock
        .requests()
        .into_iter()
        .find(|r| r.path == "/rest/v1/profiles")
        .expect("profile was looked up");
    assert_eq!(
        profile_query.param("id"),
        Some(format!("eq.{}", user.id).as_str())
    );
    assert_eq!(
        profile_query.header("authorization"),
        Some(format!("Bearer {}", user.access_token).as_str())
    );
}

// ── Token outcomes ──────────────────────────────────────────────────

#[tokio::test]
async fn rejected_token_resolves_to_no_session() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;

    let resolved = resolve_session(&client, &client, "expired").await.unwrap();
    assert_eq!(resolved, None);
    assert_eq!(
        SessionStatus::from_lookup(resolved),
        SessionStatus::Anonymous
    );
}

#[tokio::test]
async fn auth_outage_is_an_error_not_a_sign_out() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;
    mock.force_response(StatusCode::BAD_GATEWAY, json!({"message": "upstream down"}));

    let err = resolve_session(&client, &client, "token").await.unwrap_err();
    assert_eq!(err, GatewayError::rejected(502, "upstream down"));
}

// ── Sign-in ─────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_returns_grant_and_lecturer_session() {
    let (mock, user) = MockSupabase::new().with_user("grace@uni.test", "pw");
    let mock = mock.with_rows("profiles", vec![profile_row(&user, json!("lecturer"), "Grace")]);
    let client = mock.spawn().await;

    let (grant, session) = sign_in(&client, &client, "grace@uni.test", "pw").await.unwrap();
    assert_eq!(grant.access_token, user.access_token);
    assert_eq!(session.role, Role::Lecturer);
    assert_eq!(session.role.group(), Some(RoleGroup::Lecturer));
    assert_eq!(session.display_name, "Grace");
}

#[tokio::test]
async fn memory_backend_sign_in_matches_remote_behavior() {
    let backend = MemoryBackend::new();
    backend.add_account("root@uni.test", "pw", Role::Superadmin, "Root");

    let (grant, session) = sign_in(&backend, &backend, "root@uni.test", "pw").await.unwrap();
    assert_eq!(session.role.group(), Some(RoleGroup::Admin));

    let again = resolve_session(&backend, &backend, &grant.access_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again, session);

    let err = sign_in(&backend, &backend, "root@uni.test", "nope").await.unwrap_err();
    assert_eq!(err, GatewayError::rejected(400, "Invalid login credentials"));
}
