//! Counters for source traffic and dedup.
//!
//! Nothing is exported unless `init_metrics` installs the Prometheus recorder;
//! without a recorder every call here is a no-op.

use std::net::SocketAddr;
use tracing::{info, warn};

const METRICS_ADDR_ENV: &str = "SHOW_FINDER_METRICS_ADDR";

/// Install the Prometheus exporter when `SHOW_FINDER_METRICS_ADDR` is set.
/// Must be called from inside the tokio runtime.
pub fn init_metrics() {
    let Ok(addr_str) = std::env::var(METRICS_ADDR_ENV) else {
        return;
    };
    let addr: SocketAddr = match addr_str.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid {} '{}': {}", METRICS_ADDR_ENV, addr_str, e);
            return;
        }
    };
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed: {}", e),
    }
}

/// Per-source request and parse counters
pub struct SourcesMetrics;

impl SourcesMetrics {
    pub fn record_request(source: &'static str) {
        ::metrics::counter!("show_finder_requests_total", "source" => source).increment(1);
    }

    pub fn record_request_error(source: &'static str) {
        ::metrics::counter!("show_finder_request_failures_total", "source" => source).increment(1);
    }

    pub fn record_shows_parsed(source: &'static str, count: usize) {
        ::metrics::counter!("show_finder_shows_parsed_total", "source" => source)
            .increment(count as u64);
    }
}

pub fn record_duplicates_removed(count: usize) {
    ::metrics::counter!("show_finder_duplicates_removed_total").increment(count as u64);
}
