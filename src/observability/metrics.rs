//! Metrics collection and exposition.
//!
//! # Metrics
//! - `directory_fetch_total` (counter): upstream fetches by outcome
//! - `directory_doctors_loaded` (gauge): doctors in the loaded list
//! - `directory_field_fallbacks_total` (counter): defaults applied, by field
//! - `directory_queries_total` (counter): API calls by endpoint

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::directory::normalize::FallbackLog;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_fetch(outcome: &'static str) {
    metrics::counter!("directory_fetch_total", "outcome" => outcome).increment(1);
}

pub fn record_doctors_loaded(count: usize) {
    metrics::gauge!("directory_doctors_loaded").set(count as f64);
}

pub fn record_fallbacks(log: &FallbackLog) {
    for (field, count) in log.iter() {
        metrics::counter!("directory_field_fallbacks_total", "field" => field).increment(count as u64);
    }
}

pub fn record_query(endpoint: &'static str) {
    metrics::counter!("directory_queries_total", "endpoint" => endpoint).increment(1);
}
