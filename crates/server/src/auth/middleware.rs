use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use super::cookies::{self, AccessToken, CookieSlot, PendingCookieAction};
use crate::gateway::{GatewayError, SessionProvider, TokenGrant};

/// What the middleware decided about the request's tokens before the handler ran.
enum Refresh {
    NotNeeded,
    Renewed(TokenGrant),
    /// The refresh token was rejected; drop both cookies.
    Stale,
}

/// Permissive session middleware.
///
/// On each request:
/// 1. Passes the access token (cookie, or Bearer header fallback) on as `AccessToken`
/// 2. If the access cookie has expired, refreshes it from the refresh cookie
/// 3. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 4. After the handler runs, applies refreshed or scheduled cookies to the response
///
/// Never rejects a request; server functions decide what a missing session means.
pub async fn session_middleware(
    State(sessions): State<Arc<dyn SessionProvider>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers();
    let access_token = cookies::extract_access_token(headers);
    let refresh_token = cookies::extract_refresh_token(headers);

    let refresh = match (access_token, refresh_token) {
        (Some(token), _) => {
            req.extensions_mut().insert(AccessToken(token));
            Refresh::NotNeeded
        }
        (None, Some(refresh_token)) => match sessions.refresh(&refresh_token).await {
            Ok(grant) => {
                req.extensions_mut()
                    .insert(AccessToken(grant.access_token.clone()));
                Refresh::Renewed(grant)
            }
            // The auth service answers 400 for unknown or reused refresh tokens.
            Err(e @ GatewayError::Rejected { status: 400 | 401 | 403, .. }) => {
                tracing::debug!(error = %e, "refresh token rejected; clearing session cookies");
                Refresh::Stale
            }
            Err(e) => {
                tracing::warn!(error = %e, "session refresh failed");
                Refresh::NotNeeded
            }
        },
        (None, None) => Refresh::NotNeeded,
    };

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    match refresh {
        Refresh::Renewed(grant) => cookies::set_auth_cookies(response.headers_mut(), &grant),
        Refresh::Stale => cookies::clear_auth_cookies(response.headers_mut()),
        Refresh::NotNeeded => {}
    }

    // A server function's sign-in or sign-out wins over the refresh outcome.
    if let Some(action) = cookie_slot.take() {
        match action {
            PendingCookieAction::Set(grant) => {
                cookies::set_auth_cookies(response.headers_mut(), &grant);
            }
            PendingCookieAction::Clear => {
                cookies::clear_auth_cookies(response.headers_mut());
            }
        }
    }

    response
}
