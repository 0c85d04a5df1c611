use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use crate::gateway::TokenGrant;

pub const UNION_ACCESS: &str = "union_access";
pub const UNION_REFRESH: &str = "union_refresh";

const DEFAULT_REFRESH_DAYS: i64 = 30;

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

fn refresh_cookie_days() -> i64 {
    std::env::var("REFRESH_COOKIE_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REFRESH_DAYS)
}

fn build_cookie(name: &'static str, value: &str, max_age: cookie::time::Duration) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name, value))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    match HeaderValue::from_str(&cookie.build().to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(cookie = name, error = %e, "refusing to emit malformed cookie");
            None
        }
    }
}

/// Set-Cookie value for the access token; expires with the token.
pub fn build_access_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    build_cookie(UNION_ACCESS, token, cookie::time::Duration::seconds(max_age_secs))
}

pub fn build_refresh_cookie(token: &str, max_age_days: i64) -> Option<HeaderValue> {
    build_cookie(UNION_REFRESH, token, cookie::time::Duration::days(max_age_days))
}

/// Extract the access token from cookies (preferred) or Bearer header (fallback).
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, UNION_ACCESS) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, UNION_REFRESH)
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

pub fn set_auth_cookies(headers: &mut HeaderMap, grant: &TokenGrant) {
    let cookies = [
        build_access_cookie(&grant.access_token, grant.expires_in),
        build_refresh_cookie(&grant.refresh_token, refresh_cookie_days()),
    ];
    for value in cookies.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for name in [UNION_ACCESS, UNION_REFRESH] {
        if let Some(value) = build_cookie(name, "", cookie::time::Duration::ZERO) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}

/// Access token the session middleware accepted (or minted by refresh) for this request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken(pub String);

/// Cookie change a server function asks the middleware to apply to the response.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set(TokenGrant),
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Called from server functions; applied by the session middleware.
pub fn schedule_auth_cookies(grant: &TokenGrant) {
    schedule(PendingCookieAction::Set(grant.clone()));
}

pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}

/// The caller's access token: the middleware's choice first, then the raw headers.
pub fn current_access_token() -> Option<String> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    if let Some(AccessToken(token)) = parts.extensions.get::<AccessToken>() {
        return Some(token.clone());
    }
    extract_access_token(&parts.headers)
}
