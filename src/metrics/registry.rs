// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // RELAY METRICS
    // ============================================================================

    /// Relay requests by outcome
    pub static ref RELAY_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("relay_requests_total", "Total colorize requests handled by the relay"),
        &["outcome"], // outcome: success, configuration, transport, malformed_response, ...
        REGISTRY
    ).unwrap();

    // ============================================================================
    // GEMINI API METRICS
    // ============================================================================

    /// Upstream calls by status
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_calls_total", "Total generateContent calls"),
        &["model", "status_code"],
        REGISTRY
    ).unwrap();

    /// Upstream call duration
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upstream_duration_seconds", "generateContent call duration")
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // EXTRACTION METRICS
    // ============================================================================

    /// Extraction results by matching envelope shape
    pub static ref EXTRACTIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("extractions_total", "Image extraction attempts by envelope shape"),
        &["shape"], // shape: candidate_content_parts, ..., none
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        RELAY_REQUESTS.with_label_values(&["success"]).inc();
        EXTRACTIONS.with_label_values(&["root_inline"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("relay_requests_total"));
        assert!(metrics.contains("extractions_total"));
    }
}
