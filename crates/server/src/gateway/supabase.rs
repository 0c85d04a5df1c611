use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared_types::Collection;
use std::time::Duration;

use super::{AuthIdentity, Filter, Gateway, GatewayError, Query, SessionProvider, TokenGrant};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// --- Environment helpers ---

fn supabase_url() -> Option<String> {
    std::env::var("SUPABASE_URL")
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

fn supabase_anon_key() -> Option<String> {
    std::env::var("SUPABASE_ANON_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn gateway_timeout() -> Duration {
    let secs = std::env::var("GATEWAY_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfig {
    /// Project URL without a trailing slash, e.g. `https://abc.supabase.co`.
    pub url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// `None` unless both `SUPABASE_URL` and `SUPABASE_ANON_KEY` are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            url: supabase_url()?,
            anon_key: supabase_anon_key()?,
            timeout: gateway_timeout(),
        })
    }
}

/// PostgREST + GoTrue client for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(SupabaseConfig::from_env().ok_or(GatewayError::NotConfigured)?)
    }

    fn rest_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.config.url, collection.as_str())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    /// Attach the project key and a bearer token (the caller's, else the anon key).
    fn authed(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token.unwrap_or(&self.config.anon_key))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::rejected(status.as_u16(), rejection_message(&body)))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, GatewayError> {
        Self::send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Pull a human-readable message out of a PostgREST or GoTrue error body.
pub fn rejection_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request rejected".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl Gateway for SupabaseClient {
    #[tracing::instrument(skip(self, auth), fields(collection = %query.collection))]
    async fn select(&self, query: &Query, auth: Option<&str>) -> Result<Vec<Value>, GatewayError> {
        let builder = self
            .http
            .get(self.rest_url(query.collection))
            .query(&query.to_params());
        Self::send_json(self.authed(builder, auth)).await
    }

    #[tracing::instrument(skip(self, patch, auth), fields(collection = %collection, column = %filter.column))]
    async fn update(
        &self,
        collection: Collection,
        patch: &Value,
        filter: &Filter,
        auth: Option<&str>,
    ) -> Result<Vec<Value>, GatewayError> {
        let builder = self
            .http
            .patch(self.rest_url(collection))
            .query(&[filter.to_param()])
            .header("Prefer", "return=representation")
            .json(patch);
        Self::send_json(self.authed(builder, auth)).await
    }
}

#[async_trait]
impl SessionProvider for SupabaseClient {
    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenGrant, GatewayError> {
        let builder = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        Self::send_json(self.authed(builder, None)).await
    }

    #[tracing::instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, GatewayError> {
        let builder = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        Self::send_json(self.authed(builder, None)).await
    }

    #[tracing::instrument(skip_all)]
    async fn identity(&self, access_token: &str) -> Result<AuthIdentity, GatewayError> {
        let builder = self.http.get(self.auth_url("user"));
        Self::send_json(self.authed(builder, Some(access_token))).await
    }

    #[tracing::instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        let builder = self.http.post(self.auth_url("logout"));
        Self::send(self.authed(builder, Some(access_token))).await?;
        Ok(())
    }
}
