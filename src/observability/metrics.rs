//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by method, route, status
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_upstream_requests_total` (counter): outbound calls by endpoint, outcome
//! - `relay_upstream_duration_seconds` (histogram): outbound latency
//!
//! # Design Decisions
//! - Labels use route templates, never raw paths (file IDs stay out)
//! - Outcome is the upstream status code, or `error` for transport failures

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::upstream::Endpoint;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    ::metrics::counter!(
        "relay_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        "relay_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(elapsed);
}

/// Record one outbound Google call.
pub fn record_upstream(endpoint: Endpoint, outcome: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    ::metrics::counter!(
        "relay_upstream_requests_total",
        "endpoint" => endpoint.as_str(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        "relay_upstream_duration_seconds",
        "endpoint" => endpoint.as_str()
    )
    .record(elapsed);
}
