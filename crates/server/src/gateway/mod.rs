//! Backend boundary: row reads/writes (`Gateway`) and authentication
//! (`SessionProvider`).
//!
//! `SupabaseClient` implements both against PostgREST and GoTrue;
//! `MemoryBackend` implements both in-process for local runs and tests.

pub mod memory;
pub mod query;
pub mod supabase;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::Collection;
use std::fmt;
use uuid::Uuid;

pub use memory::MemoryBackend;
pub use query::{Filter, Query};
pub use supabase::{SupabaseClient, SupabaseConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The request never produced a response (connect, timeout, TLS).
    Transport(String),
    /// The backend answered with a non-2xx status.
    Rejected { status: u16, message: String },
    /// The response body did not have the expected shape.
    Decode(String),
    NotConfigured,
}

impl GatewayError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether the backend refused the caller's credentials.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, GatewayError::Rejected { status: 401 | 403, .. })
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "backend unreachable: {msg}"),
            GatewayError::Rejected { status, message } => write!(f, "{message} (status {status})"),
            GatewayError::Decode(msg) => write!(f, "unexpected backend response: {msg}"),
            GatewayError::NotConfigured => write!(f, "backend is not configured"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Identity the auth service attaches to an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued by a password or refresh grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    pub user: Option<AuthIdentity>,
}

fn default_expires_in() -> i64 {
    3600
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Rows of `query.collection`, filtered, ordered and limited as requested.
    /// `auth` is the caller's access token; `None` reads as the anonymous role.
    async fn select(&self, query: &Query, auth: Option<&str>) -> Result<Vec<Value>, GatewayError>;

    /// Apply `patch` to every row matching `filter` and return the updated rows.
    async fn update(
        &self,
        collection: Collection,
        patch: &Value,
        filter: &Filter,
        auth: Option<&str>,
    ) -> Result<Vec<Value>, GatewayError>;
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenGrant, GatewayError>;

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, GatewayError>;

    async fn identity(&self, access_token: &str) -> Result<AuthIdentity, GatewayError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError>;
}

/// Decode raw rows into `T`, failing the whole read on the first bad row.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, GatewayError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| GatewayError::Decode(e.to_string())))
        .collect()
}

pub async fn select_rows<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    query: &Query,
    auth: Option<&str>,
) -> Result<Vec<T>, GatewayError> {
    decode_rows(gateway.select(query, auth).await?)
}
