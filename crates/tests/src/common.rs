use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use server::gateway::{SupabaseClient, SupabaseConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const ANON_KEY: &str = "anon-test-key";

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub access_token: String,
}

#[derive(Default)]
struct MockInner {
    requests: Vec<RecordedRequest>,
    tables: HashMap<String, Vec<Value>>,
    users: Vec<MockUser>,
    refresh_tokens: HashMap<String, Uuid>,
    forced: Option<(StatusCode, Value)>,
}

/// A PostgREST + GoTrue stand-in served over HTTP on an ephemeral port.
#[derive(Clone, Default)]
pub struct MockSupabase {
    inner: Arc<Mutex<MockInner>>,
}

impl MockSupabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .tables
            .insert(table.to_string(), rows);
        self
    }

    /// Register an account; its access token is `token-<email>`.
    pub fn with_user(self, email: &str, password: &str) -> (Self, MockUser) {
        let user = MockUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
            access_token: format!("token-{email}"),
        };
        self.inner.lock().unwrap().users.push(user.clone());
        (self, user)
    }

    pub fn with_refresh_token(self, token: &str, user_id: Uuid) -> Self {
        self.inner
            .lock()
            .unwrap()
            .refresh_tokens
            .insert(token.to_string(), user_id);
        self
    }

    /// Answer every request with `status` and `body`.
    pub fn force_response(&self, status: StatusCode, body: Value) {
        self.inner.lock().unwrap().forced = Some((status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("mock received no requests")
    }

    /// Serve the mock and return a client pointed at it.
    pub async fn spawn(&self) -> SupabaseClient {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        SupabaseClient::new(SupabaseConfig::new(format!("http://{addr}"), ANON_KEY)).unwrap()
    }
}

fn grant_for(user: &MockUser, refresh: &str) -> Value {
    json!({
        "access_token": user.access_token,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": refresh,
        "user": { "id": user.id, "email": user.email }
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn handle(
    State(mock): State<MockSupabase>,
    method: Method,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let path = uri.path().to_string();

    let mut inner = mock.inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        params: params.clone(),
        headers: headers.clone(),
        body: body.clone(),
    });

    if let Some((status, body)) = inner.forced.clone() {
        return (status, Json(body)).into_response();
    }

    let param = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    if let Some(table) = path.strip_prefix("/rest/v1/") {
        let rows = inner.tables.get(table).cloned().unwrap_or_default();
        let filters: Vec<(String, String)> = params
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "select" | "order" | "limit"))
            .filter_map(|(k, v)| v.strip_prefix("eq.").map(|v| (k.clone(), v.to_string())))
            .collect();
        let matches = |row: &Value| {
            filters.iter().all(|(col, val)| match &row[col] {
                Value::String(s) => s == val,
                other => other.to_string() == *val,
            })
        };

        return match method {
            Method::GET => {
                let limit = param("limit")
                    .and_then(|l| l.parse().ok())
                    .unwrap_or(usize::MAX);
                let rows: Vec<Value> = rows.into_iter().filter(|r| matches(r)).take(limit).collect();
                Json(rows).into_response()
            }
            Method::PATCH => {
                let patch = body.unwrap_or_else(|| json!({}));
                let updated: Vec<Value> = rows
                    .into_iter()
                    .filter(|r| matches(r))
                    .map(|mut row| {
                        if let (Some(obj), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                            for (k, v) in fields {
                                obj.insert(k.clone(), v.clone());
                            }
                        }
                        row
                    })
                    .collect();
                Json(updated).into_response()
            }
            _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
        };
    }

    match (method, path.as_str()) {
        (Method::POST, "/auth/v1/token") => {
            let body = body.unwrap_or_default();
            match param("grant_type").as_deref() {
                Some("password") => {
                    let found = inner.users.iter().find(|u| {
                        body["email"] == u.email.as_str() && body["password"] == u.password.as_str()
                    });
                    match found {
                        Some(user) => {
                            let user = user.clone();
                            let refresh = format!("refresh-{}", Uuid::new_v4());
                            inner.refresh_tokens.insert(refresh.clone(), user.id);
                            Json(grant_for(&user, &refresh)).into_response()
                        }
                        None => (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
                        )
                            .into_response(),
                    }
                }
                Some("refresh_token") => {
                    let token = body["refresh_token"].as_str().unwrap_or_default().to_string();
                    let owner = inner.refresh_tokens.remove(&token);
                    match owner.and_then(|id| inner.users.iter().find(|u| u.id == id).cloned()) {
                        Some(user) => {
                            let refresh = format!("refresh-{}", Uuid::new_v4());
                            inner.refresh_tokens.insert(refresh.clone(), user.id);
                            Json(grant_for(&user, &refresh)).into_response()
                        }
                        None => (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": "invalid_grant", "error_description": "Invalid Refresh Token: Refresh Token Not Found"})),
                        )
                            .into_response(),
                    }
                }
                _ => StatusCode::BAD_REQUEST.into_response(),
            }
        }
        (Method::GET, "/auth/v1/user") => {
            let token = bearer(&headers);
            match inner
                .users
                .iter()
                .find(|u| Some(&u.access_token) == token.as_ref())
            {
                Some(user) => Json(json!({"id": user.id, "email": user.email, "aud": "authenticated"}))
                    .into_response(),
                None => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"code": 401, "error_code": "bad_jwt", "msg": "invalid JWT"})),
                )
                    .into_response(),
            }
        }
        (Method::POST, "/auth/v1/logout") => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Send a request through a router and collect status, headers and body text.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8_lossy(&bytes).to_string())
}

/// All Set-Cookie header values on a response.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn gallery_row(id: i64, title: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "image_url": format!("https://cdn.example/gallery/{id}.jpg"),
        "created_at": created_at,
    })
}
