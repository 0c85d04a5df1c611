use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::cookies::AccessToken;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SERVICE_NAME: &str = "student-union";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the gRPC exporters; `dioxus::serve` may call us before a
/// Tokio context is entered.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Set up OTLP trace and log export when enabled.
///
/// Dioxus owns the `tracing` subscriber; this only registers the global
/// tracer provider (fed by `OtelTraceLayer`) and bridges the `log` crate.
///
/// Reads:
///   - `[features] telemetry` in `config.toml` (off by default)
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`, e.g. `http://localhost:4317`
///   - `OTEL_SERVICE_NAME` (default `student-union`)
///   - `DEPLOY_ENV` (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    if !crate::config::feature_flags().telemetry {
        tracing::debug!("telemetry feature off; skipping OTLP export");
        return;
    }
    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set; skipping OTLP export");
        return;
    };

    match install_exporters(&endpoint) {
        Ok(()) => tracing::info!(%endpoint, version = APP_VERSION, "telemetry exporting traces and logs"),
        Err(e) => tracing::warn!(%endpoint, error = %e, "telemetry setup failed; continuing without export"),
    }
}

fn tls_config(endpoint: &str) -> Option<opentelemetry_otlp::tonic_types::transport::ClientTlsConfig> {
    endpoint
        .starts_with("https://")
        .then(|| opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots())
}

fn install_exporters(endpoint: &str) -> Result<(), BoxError> {
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    if OTEL_RUNTIME.get().is_none() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()?;
        let _ = OTEL_RUNTIME.set(rt);
    }
    let _guard = OTEL_RUNTIME
        .get()
        .ok_or("telemetry runtime unavailable")?
        .enter();

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint);
    if let Some(tls) = tls_config(endpoint) {
        span_builder = span_builder.with_tls_config(tls);
    }
    let span_exporter = span_builder.build()?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(tracer_provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint);
    if let Some(tls) = tls_config(endpoint) {
        log_builder = log_builder.with_tls_config(tls);
    }
    let log_exporter = log_builder.build()?;

    let logger_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();
    let logger_provider = LOGGER_PROVIDER.get_or_init(|| logger_provider);

    // Separate from the tracing subscriber, so no conflict with Dioxus.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::debug!("log bridge skipped; a logger is already installed"),
    }
    Ok(())
}

/// Span name for a request: method plus path, with trailing ids folded away.
pub fn span_name(method: &str, path: &str) -> String {
    let route = path.trim_end_matches(|c: char| c.is_ascii_digit());
    format!("{method} {route}")
}

/// Tower layer that opens an OpenTelemetry server span per HTTP request.
///
/// Records method, path, request id, whether a session token was presented,
/// and the response status.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(DEFAULT_SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let auth_status = if req.extensions().get::<AccessToken>().is_some() {
            "token"
        } else {
            "anonymous"
        };

        let span = tracer
            .span_builder(span_name(&method, &path))
            .with_kind(SpanKind::Server)
            .with_attributes(vec![
                KeyValue::new("http.method", method),
                KeyValue::new("http.target", path),
                KeyValue::new("http.request_id", request_id),
                KeyValue::new("auth.status", auth_status),
            ])
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));
            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            }

            Ok(response)
        })
    }
}
