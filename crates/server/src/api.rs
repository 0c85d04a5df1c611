use dioxus::prelude::*;
use shared_types::{GalleryItem, Profile, Session, SportItem, UpdateProfileRequest};

#[cfg(feature = "server")]
use crate::backend::backend;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, GatewayErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use crate::auth::cookies;

// ── Auth helpers for server functions ──────────────────

/// The caller's access token and resolved session, or an "Authentication required" error.
#[cfg(feature = "server")]
async fn require_session() -> Result<(String, Session), ServerFnError> {
    use shared_types::AppError;

    let token = cookies::current_access_token()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    let b = backend();
    crate::session::resolve_session(b.gateway.as_ref(), b.sessions.as_ref(), &token)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?
        .map(|session| (token, session))
        .ok_or_else(|| {
            AppError::unauthorized("Your session has expired. Please sign in again.")
                .into_server_fn_error()
        })
}

/// Current session, or `None` when signed out or the token is no longer valid.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    let Some(token) = cookies::current_access_token() else {
        return Ok(None);
    };

    let b = backend();
    crate::session::resolve_session(b.gateway.as_ref(), b.sessions.as_ref(), &token)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn sign_in(email: String, password: String) -> Result<Session, ServerFnError> {
    use shared_types::SignInRequest;

    let req = SignInRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let b = backend();
    let (grant, session) =
        crate::session::sign_in(b.gateway.as_ref(), b.sessions.as_ref(), &req.email, &req.password)
            .await
            .map_err(|e| e.into_app_error().into_server_fn_error())?;

    cookies::schedule_auth_cookies(&grant);
    tracing::info!(user_id = %session.user_id, role = session.role.as_str(), "signed in");
    Ok(session)
}

/// Revoke the token at the auth service (best effort) and clear both cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    if let Some(token) = cookies::current_access_token() {
        if let Err(e) = backend().sessions.sign_out(&token).await {
            tracing::warn!(error = %e, "token revocation failed; clearing cookies anyway");
        }
    }

    cookies::schedule_clear_cookies();
    Ok(())
}

/// Most recent gallery rows, newest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_gallery() -> Result<Vec<GalleryItem>, ServerFnError> {
    let limit = crate::config::content_limits().gallery_limit;
    let token = cookies::current_access_token();
    crate::content::recent_rows(
        backend().gateway.as_ref(),
        shared_types::Collection::Gallery,
        limit,
        token.as_deref(),
    )
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())
}

/// Most recent sports activities, newest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_sports() -> Result<Vec<SportItem>, ServerFnError> {
    let limit = crate::config::content_limits().sports_limit;
    let token = cookies::current_access_token();
    crate::content::recent_rows(
        backend().gateway.as_ref(),
        shared_types::Collection::Sports,
        limit,
        token.as_deref(),
    )
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())
}

/// Change the caller's display name. Requires a session.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_display_name(request: UpdateProfileRequest) -> Result<Profile, ServerFnError> {
    let (token, session) = require_session().await?;
    crate::profile::update_display_name(backend().gateway.as_ref(), &session, request, &token)
        .await
        .map_err(|e| e.into_server_fn_error())
}
