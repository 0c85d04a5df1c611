use axum::{body::Body, http::{Request, StatusCode}, routing::get, Router};
use serde_json::Value;
use server::health::{health_check, record_start_time};

use crate::common::*;

#[tokio::test]
async fn health_reports_ok_and_backend_mode() {
    record_start_time();
    let app = Router::new().route("/health", get(health_check));
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, _, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(matches!(json["backend"].as_str(), Some("supabase" | "memory")));
    assert!(json["uptime_seconds"].is_u64());
}
