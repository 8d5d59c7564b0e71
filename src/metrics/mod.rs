// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{gather_metrics, EXTRACTIONS, RELAY_REQUESTS, UPSTREAM_CALLS, UPSTREAM_DURATION};

use crate::extraction::EnvelopeShape;

/// Helper to record the outcome of one relayed request
pub fn record_relay_outcome(outcome: &str) {
    RELAY_REQUESTS.with_label_values(&[outcome]).inc();
}

/// Helper to record Gemini API call metrics
pub fn record_upstream_call(model: &str, status_code: u16, duration_secs: f64) {
    UPSTREAM_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    UPSTREAM_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

/// Helper to record which shape an image was found in, if any
pub fn record_extraction(shape: Option<EnvelopeShape>) {
    let label = shape.map(|s| s.as_str()).unwrap_or("none");
    EXTRACTIONS.with_label_values(&[label]).inc();
}
