//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ocr_gateway_requests_total` (counter): requests by method, path,
//!   status
//! - `ocr_gateway_request_duration_seconds` (histogram): latency
//! - `ocr_gateway_gate_decisions_total` (counter): auth gate outcomes
//!   (`preflight`, `not_required`, `allowed`, `rejected`)
//!
//! # Design Decisions
//! - Recording is cheap (atomic increments) and always on; the
//!   Prometheus endpoint itself is opt-in
//! - Recording before an exporter is installed is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside the Tokio
/// runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics endpoint"),
    }
}

pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    metrics::counter!(
        "ocr_gateway_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("ocr_gateway_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_gate_decision(outcome: &'static str) {
    metrics::counter!("ocr_gateway_gate_decisions_total", "outcome" => outcome).increment(1);
}
