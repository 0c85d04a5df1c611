use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::gateway::{Gateway, GatewayError, Query, SupabaseClient, SupabaseConfig};
use shared_types::Collection;

use crate::common::*;

// ── Query string ────────────────────────────────────────────────────

#[tokio::test]
async fn select_sends_postgrest_params() {
    let mock = MockSupabase::new().with_rows("gallery", vec![gallery_row(1, "Freshers' Fair", "2026-09-20T11:00:00Z")]);
    let client = mock.spawn().await;

    let query = Query::select(Collection::Gallery).order_desc("created_at").limit(12);
    let rows = client.select(&query, None).await.unwrap();
    assert_eq!(rows.len(), 1);

    let req = mock.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/rest/v1/gallery");
    assert_eq!(req.param("select"), Some("*"));
    assert_eq!(req.param("order"), Some("created_at.desc"));
    assert_eq!(req.param("limit"), Some("12"));
}

#[tokio::test]
async fn select_renders_equality_filters() {
    let mock = MockSupabase::new().with_rows(
        "profiles",
        vec![
            json!({"id": "a", "role": "student"}),
            json!({"id": "b", "role": "admin"}),
        ],
    );
    let client = mock.spawn().await;

    let query = Query::select(Collection::Profiles).eq("id", "b").limit(1);
    let rows = client.select(&query, Some("user-token")).await.unwrap();

    assert_eq!(rows, vec![json!({"id": "b", "role": "admin"})]);
    assert_eq!(mock.last_request().param("id"), Some("eq.b"));
}

// ── Headers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_reads_use_anon_key_as_bearer() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;

    client.select(&Query::select(Collection::Sports), None).await.unwrap();

    let req = mock.last_request();
    assert_eq!(req.header("apikey"), Some(ANON_KEY));
    assert_eq!(req.header("authorization"), Some("Bearer anon-test-key"));
}

#[tokio::test]
async fn signed_in_reads_forward_user_token() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;

    client
        .select(&Query::select(Collection::Sports), Some("user-token"))
        .await
        .unwrap();

    let req = mock.last_request();
    assert_eq!(req.header("apikey"), Some(ANON_KEY));
    assert_eq!(req.header("authorization"), Some("Bearer user-token"));
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn error_status_becomes_rejection_with_message() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;
    mock.force_response(
        StatusCode::FORBIDDEN,
        json!({"code": "42501", "message": "permission denied for table gallery"}),
    );

    let err = client
        .select(&Query::select(Collection::Gallery), None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected {
            status: 403,
            message: "permission denied for table gallery".to_string()
        }
    );
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn non_array_body_is_decode_error() {
    let mock = MockSupabase::new();
    let client = mock.spawn().await;
    mock.force_response(StatusCode::OK, json!({"unexpected": true}));

    let err = client
        .select(&Query::select(Collection::Gallery), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SupabaseClient::new(SupabaseConfig::new(format!("http://{addr}"), ANON_KEY)).unwrap();
    let err = client
        .select(&Query::select(Collection::Gallery), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)), "got {err:?}");
}
