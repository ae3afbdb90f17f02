//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitoring_status_degraded` (gauge): 1=degraded, 0=healthy
//! - `monitoring_status_checks_total` (counter): checks by reason ("none" when healthy)
//! - `monitoring_status_firing_alerts` (gauge): critical alerts in the last successful query
//!
//! Without an installed recorder every call is a no-op, so one-shot checks
//! pay nothing.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::status::DegradationStatus;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record the outcome of one check. `firing` is set when the alert query
/// succeeded.
pub fn record_check(status: &DegradationStatus, firing: Option<usize>) {
    let reason = match status.reason_code() {
        "" => "none",
        code => code,
    };

    metrics::counter!("monitoring_status_checks_total", "reason" => reason).increment(1);
    metrics::gauge!("monitoring_status_degraded").set(if status.is_degraded() { 1.0 } else { 0.0 });

    if let Some(count) = firing {
        metrics::gauge!("monitoring_status_firing_alerts").set(count as f64);
    }
}
