//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by route, method, status
//! - `proxy_request_duration_seconds` (histogram): latency by route
//! - `proxy_capability_failures_total` (counter): failed capability calls (500 envelopes) by route
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels come from the fixed route table and a closed set of method names,
//!   so client input cannot create new series

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter, serving scrapes on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Metric label for `method`. Extension methods collapse into `OTHER`.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::OPTIONS => "OPTIONS",
        Method::HEAD => "HEAD",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        _ => "OTHER",
    }
}

/// Record one completed request.
pub fn record_request(route: &'static str, method: &Method, status: u16, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "route" => route,
        "method" => method_label(method),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a capability answering with a 500 envelope.
pub fn record_capability_failure(route: &'static str) {
    metrics::counter!("proxy_capability_failures_total", "route" => route).increment(1);
}
