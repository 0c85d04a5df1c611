use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::gateway::SupabaseClient;
use server::profile::update_display_name;
use shared_types::{
    submit_display_name, AppErrorKind, Notification, NotificationKind, Notifier, Role, Session,
    SubmitOutcome, PROFILE_SAVED_MESSAGE,
};

use crate::common::*;

#[derive(Default)]
struct Collected(Vec<Notification>);

impl Notifier for Collected {
    fn notify(&mut self, notification: Notification) {
        self.0.push(notification);
    }
}

async fn signed_in_mock() -> (MockSupabase, SupabaseClient, Session, String) {
    let (mock, user) = MockSupabase::new().with_user("ada@uni.test", "pw");
    let mock = mock.with_rows(
        "profiles",
        vec![json!({"id": user.id, "display_name": "Ada", "role": "student", "email": user.email})],
    );
    let client = mock.spawn().await;
    let session = Session {
        user_id: user.id,
        email: user.email.clone(),
        role: Role::Student,
        display_name: "Ada".into(),
    };
    (mock, client, session, user.access_token)
}

// ── Save ────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_writes_trimmed_name_and_closes() {
    let (mock, client, session, token) = signed_in_mock().await;
    let mut saving = false;
    let mut notes = Collected::default();
    let mut closed = false;

    let outcome = submit_display_name(
        Some(&session),
        "  Ada Lovelace  ",
        &mut saving,
        &mut notes,
        |req| async { update_display_name(&client, &session, req, &token).await },
        || closed = true,
    )
    .await;

    let SubmitOutcome::Saved(profile) = outcome else {
        panic!("expected save, got {outcome:?}");
    };
    assert_eq!(profile.display_name.as_deref(), Some("Ada Lovelace"));
    assert!(closed);
    assert!(!saving);
    assert_eq!(notes.0, vec![Notification::success(PROFILE_SAVED_MESSAGE)]);

    let req = mock.last_request();
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(req.path, "/rest/v1/profiles");
    assert_eq!(req.body, Some(json!({"display_name": "Ada Lovelace"})));
    assert_eq!(
        req.header("authorization"),
        Some(format!("Bearer {token}").as_str())
    );
}

#[tokio::test]
async fn rejected_write_keeps_dialog_open_with_message() {
    let (mock, client, session, token) = signed_in_mock().await;
    mock.force_response(
        StatusCode::FORBIDDEN,
        json!({"message": "permission denied for table profiles"}),
    );
    let mut saving = false;
    let mut notes = Collected::default();
    let mut closed = false;

    let outcome = submit_display_name(
        Some(&session),
        "Ada",
        &mut saving,
        &mut notes,
        |req| async { update_display_name(&client, &session, req, &token).await },
        || closed = true,
    )
    .await;

    let SubmitOutcome::Failed(err) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert!(!closed);
    assert!(!saving);
    assert_eq!(notes.0.len(), 1);
    assert_eq!(notes.0[0].kind, NotificationKind::Failure);
    assert_eq!(notes.0[0].message, "permission denied for table profiles");
}

// ── Skips ───────────────────────────────────────────────────────────

#[tokio::test]
async fn blank_draft_sends_nothing() {
    let (mock, client, session, token) = signed_in_mock().await;
    let mut saving = false;
    let mut notes = Collected::default();

    let outcome = submit_display_name(
        Some(&session),
        "   ",
        &mut saving,
        &mut notes,
        |req| async { update_display_name(&client, &session, req, &token).await },
        || {},
    )
    .await;

    assert_eq!(outcome, SubmitOutcome::Skipped);
    assert!(notes.0.is_empty());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn second_submit_while_saving_is_ignored() {
    let (mock, client, session, token) = signed_in_mock().await;
    let mut saving = true;
    let mut notes = Collected::default();

    let outcome = submit_display_name(
        Some(&session),
        "Ada",
        &mut saving,
        &mut notes,
        |req| async { update_display_name(&client, &session, req, &token).await },
        || {},
    )
    .await;

    assert_eq!(outcome, SubmitOutcome::Skipped);
    assert!(saving);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn signed_out_submit_is_ignored() {
    let (mock, client, session, token) = signed_in_mock().await;
    let mut saving = false;
    let mut notes = Collected::default();

    let outcome = submit_display_name(
        None,
        "Ada",
        &mut saving,
        &mut notes,
        |req| async { update_display_name(&client, &session, req, &token).await },
        || {},
    )
    .await;

    assert_eq!(outcome, SubmitOutcome::Skipped);
    assert!(mock.requests().is_empty());
}
