use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::gateway::{Filter, Gateway, GatewayError};
use shared_types::Collection;

use crate::common::*;

const USER_ID: &str = "6c1f0e1a-3b7d-4c55-9a0e-2f3d4b5c6d7e";

fn profiles_mock() -> MockSupabase {
    MockSupabase::new().with_rows(
        "profiles",
        vec![
            json!({"id": USER_ID, "display_name": "Ada", "role": "student", "email": "ada@uni.test"}),
            json!({"id": "someone-else", "display_name": "Bob", "role": "student"}),
        ],
    )
}

#[tokio::test]
async fn update_is_patch_with_return_representation() {
    let mock = profiles_mock();
    let client = mock.spawn().await;

    let rows = client
        .update(
            Collection::Profiles,
            &json!({"display_name": "Ada L."}),
            &Filter::eq("id", USER_ID),
            Some("user-token"),
        )
        .await
        .unwrap();

    let req = mock.last_request();
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(req.path, "/rest/v1/profiles");
    assert_eq!(req.param("id"), Some(format!("eq.{USER_ID}").as_str()));
    assert_eq!(req.header("prefer"), Some("return=representation"));
    assert_eq!(req.header("authorization"), Some("Bearer user-token"));
    assert_eq!(req.body, Some(json!({"display_name": "Ada L."})));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["display_name"], "Ada L.");
    assert_eq!(rows[0]["id"], USER_ID);
}

#[tokio::test]
async fn update_touches_only_filtered_row() {
    let mock = profiles_mock();
    let client = mock.spawn().await;

    let rows = client
        .update(
            Collection::Profiles,
            &json!({"display_name": "Nobody"}),
            &Filter::eq("id", "missing"),
            Some("user-token"),
        )
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn row_level_security_rejection_keeps_message() {
    let mock = profiles_mock();
    let client = mock.spawn().await;
    mock.force_response(
        StatusCode::UNAUTHORIZED,
        json!({"message": "new row violates row-level security policy"}),
    );

    let err = client
        .update(
            Collection::Profiles,
            &json!({"display_name": "Ada"}),
            &Filter::eq("id", USER_ID),
            Some("user-token"),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::rejected(401, "new row violates row-level security policy")
    );
}
