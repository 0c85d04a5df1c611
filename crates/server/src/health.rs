use axum::Json;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::backend::BackendMode;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// Which backend serves data: `supabase` or `memory`.
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    pub fn new(mode: BackendMode) -> Self {
        Self {
            status: "ok".to_string(),
            backend: mode.as_str().to_string(),
            uptime_seconds: START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `GET /health`. Reports configuration only; it does not probe the backend.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(crate::backend::backend().mode))
}
