use async_trait::async_trait;
use serde_json::{json, Value};
use shared_types::{Collection, Role};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::{AuthIdentity, Filter, Gateway, GatewayError, Query, SessionProvider, TokenGrant};

const ACCESS_TTL_SECS: i64 = 3600;

/// How long a just-rotated refresh token keeps working, matching GoTrue's
/// default `REFRESH_TOKEN_REUSE_INTERVAL`.
pub const REFRESH_REUSE_WINDOW: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
struct Account {
    id: Uuid,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Access,
    Refresh,
}

/// A refresh token that was exchanged, and the token that replaced it.
#[derive(Debug, Clone)]
struct Rotation {
    user_id: Uuid,
    successor: String,
    at: Instant,
}

/// In-process tables and accounts.
///
/// Serves local development when no Supabase project is configured, and
/// stands in for the backend in tests. Each lock is held for a single read
/// or write only.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<Collection, Vec<Value>>>,
    accounts: Mutex<Vec<Account>>,
    tokens: Mutex<HashMap<String, (Uuid, TokenKind)>>,
    rotated: Mutex<HashMap<String, Rotation>>,
    reuse_window: Option<Duration>,
    failure: Mutex<Option<GatewayError>>,
    calls: Mutex<usize>,
}

fn poisoned() -> GatewayError {
    GatewayError::Transport("memory backend lock poisoned".to_string())
}

/// Strings (ISO timestamps) compare lexically, numbers numerically; missing cells sort lowest.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Less,
        (_, Some(Value::Null) | None) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn cell_matches(row: &Value, filter: &Filter) -> bool {
    match row.get(&filter.column) {
        Some(Value::String(s)) => s == &filter.value,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == filter.value,
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample gallery and sports rows for local runs.
    pub fn with_demo_content() -> Self {
        let backend = Self::new();
        backend.insert_rows(
            Collection::Gallery,
            vec![
                json!({"id": 1, "title": "Freshers' Fair", "description": "Stalls from over sixty societies on the main lawn.", "image_url": null, "created_at": "2026-09-20T11:00:00Z"}),
                json!({"id": 2, "title": "Charity Fun Run", "description": "Raising money for the campus food bank.", "image_url": null, "created_at": "2026-10-04T09:30:00Z"}),
                json!({"id": 3, "title": "Winter Ball", "description": null, "image_url": null, "created_at": "2026-02-14T20:00:00Z"}),
            ],
        );
        backend.insert_rows(
            Collection::Sports,
            vec![
                json!({"id": 1, "name": "Five-a-side Football", "description": "Casual league, all abilities welcome.", "location": "Sports Hall", "schedule": "Wednesdays 18:00", "created_at": "2026-09-22T12:00:00Z"}),
                json!({"id": 2, "name": "Rowing", "description": "Early mornings on the river.", "location": "Boathouse", "schedule": "Saturdays 07:00", "created_at": "2026-09-25T08:00:00Z"}),
            ],
        );
        backend
    }

    pub fn insert_rows(&self, collection: Collection, rows: Vec<Value>) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.entry(collection).or_default().extend(rows);
        }
    }

    /// Register a sign-in account and its `profiles` row. Returns the user id.
    pub fn add_account(&self, email: &str, password: &str, role: Role, display_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.push(Account {
                id,
                email: email.to_string(),
                password: password.to_string(),
            });
        }
        self.insert_rows(
            Collection::Profiles,
            vec![json!({
                "id": id,
                "email": email,
                "display_name": display_name,
                "role": role.as_str(),
            })],
        );
        id
    }

    /// Override how long a rotated refresh token may still be exchanged.
    pub fn with_reuse_window(mut self, window: Duration) -> Self {
        self.reuse_window = Some(window);
        self
    }

    /// Make every following call fail with `error` until cleared.
    pub fn fail_with(&self, error: Option<GatewayError>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = error;
        }
    }

    /// Number of gateway and session calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or(0)
    }

    fn begin_call(&self) -> Result<(), GatewayError> {
        *self.calls.lock().map_err(|_| poisoned())? += 1;
        match self.failure.lock().map_err(|_| poisoned())?.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn issue(&self, user: &Account) -> Result<TokenGrant, GatewayError> {
        self.issue_with_refresh(user, format!("mem-refresh-{}", Uuid::new_v4()))
    }

    fn issue_with_refresh(&self, user: &Account, refresh: String) -> Result<TokenGrant, GatewayError> {
        let access = format!("mem-access-{}", Uuid::new_v4());
        let mut tokens = self.tokens.lock().map_err(|_| poisoned())?;
        tokens.insert(access.clone(), (user.id, TokenKind::Access));
        tokens.insert(refresh.clone(), (user.id, TokenKind::Refresh));
        Ok(TokenGrant {
            access_token: access,
            refresh_token: refresh,
            expires_in: ACCESS_TTL_SECS,
            user: Some(AuthIdentity {
                id: user.id,
                email: Some(user.email.clone()),
            }),
        })
    }

    fn account_by_id(&self, id: Uuid) -> Result<Account, GatewayError> {
        self.accounts
            .lock()
            .map_err(|_| poisoned())?
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::rejected(401, "User not found"))
    }

    /// Remove a live refresh token and return its owner.
    fn take_refresh_token(&self, token: &str) -> Result<Option<Uuid>, GatewayError> {
        let mut tokens = self.tokens.lock().map_err(|_| poisoned())?;
        match tokens.get(token) {
            Some((id, TokenKind::Refresh)) => {
                let id = *id;
                tokens.remove(token);
                Ok(Some(id))
            }
            _ => Ok(None),
        }
    }

    fn token_owner(&self, token: &str, kind: TokenKind) -> Result<Uuid, GatewayError> {
        match self.tokens.lock().map_err(|_| poisoned())?.get(token) {
            Some((id, k)) if *k == kind => Ok(*id),
            _ => Err(GatewayError::rejected(401, "Invalid token")),
        }
    }
}

#[async_trait]
impl Gateway for MemoryBackend {
    async fn select(&self, query: &Query, _auth: Option<&str>) -> Result<Vec<Value>, GatewayError> {
        self.begin_call()?;
        let tables = self.tables.lock().map_err(|_| poisoned())?;
        let mut rows: Vec<Value> = tables
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| cell_matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(tables);

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_cells(a.get(&order.column), b.get(&order.column));
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn update(
        &self,
        collection: Collection,
        patch: &Value,
        filter: &Filter,
        _auth: Option<&str>,
    ) -> Result<Vec<Value>, GatewayError> {
        self.begin_call()?;
        let Some(fields) = patch.as_object() else {
            return Err(GatewayError::rejected(400, "patch body must be a JSON object"));
        };

        let mut tables = self.tables.lock().map_err(|_| poisoned())?;
        let mut updated = Vec::new();
        for row in tables.entry(collection).or_default().iter_mut() {
            if !cell_matches(row, filter) {
                continue;
            }
            if let Some(obj) = row.as_object_mut() {
                for (key, value) in fields {
                    obj.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }
}

#[async_trait]
impl SessionProvider for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenGrant, GatewayError> {
        self.begin_call()?;
        let account = self
            .accounts
            .lock()
            .map_err(|_| poisoned())?
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .cloned()
            .ok_or_else(|| GatewayError::rejected(400, "Invalid login credentials"))?;
        self.issue(&account)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, GatewayError> {
        self.begin_call()?;
        let now = Instant::now();
        let window = self.reuse_window.unwrap_or(REFRESH_REUSE_WINDOW);
        match self.take_refresh_token(refresh_token)? {
            Some(user_id) => {
                let account = self.account_by_id(user_id)?;
                let grant = self.issue(&account)?;
                let mut rotated = self.rotated.lock().map_err(|_| poisoned())?;
                rotated.retain(|_, r| now.duration_since(r.at) < window);
                rotated.insert(
                    refresh_token.to_string(),
                    Rotation {
                        user_id,
                        successor: grant.refresh_token.clone(),
                        at: now,
                    },
                );
                Ok(grant)
            }
            None => {
                let rejected = GatewayError::rejected(401, "Invalid token");
                // Concurrent requests may present the same token; inside the
                // window they share its successor instead of being rejected.
                let rotation = self
                    .rotated
                    .lock()
                    .map_err(|_| poisoned())?
                    .get(refresh_token)
                    .filter(|r| now.duration_since(r.at) < window)
                    .cloned();
                let Some(rotation) = rotation else {
                    return Err(rejected);
                };
                if self.token_owner(&rotation.successor, TokenKind::Refresh).is_err() {
                    return Err(rejected);
                }
                let account = self.account_by_id(rotation.user_id)?;
                self.issue_with_refresh(&account, rotation.successor)
            }
        }
    }

    async fn identity(&self, access_token: &str) -> Result<AuthIdentity, GatewayError> {
        self.begin_call()?;
        let user_id = self.token_owner(access_token, TokenKind::Access)?;
        let account = self.account_by_id(user_id)?;
        Ok(AuthIdentity {
            id: account.id,
            email: Some(account.email),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        self.begin_call()?;
        let user_id = self.token_owner(access_token, TokenKind::Access)?;
        self.tokens
            .lock()
            .map_err(|_| poisoned())?
            .retain(|_, (owner, _)| *owner != user_id);
        Ok(())
    }
}
