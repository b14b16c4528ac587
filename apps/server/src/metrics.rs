//! Prometheus metrics for the specref service

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge,
    register_int_gauge_vec, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};
use specref_units::ConversionError;

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "specref_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "specref_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "specref_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    /// HTTP response size in bytes
    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "specref_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Conversion Metrics

    /// Conversions by endpoint and outcome (`ok` or an error kind)
    pub static ref CONVERSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "specref_conversions_total",
        "Total number of unit conversions",
        &["endpoint", "outcome"]
    )
    .expect("Failed to register CONVERSIONS_TOTAL");

    /// Equations applied per successful conversion
    pub static ref CONVERSION_HOPS: HistogramVec = register_histogram_vec!(
        "specref_conversion_hops",
        "Number of equations applied per conversion",
        &["endpoint"],
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0]
    )
    .expect("Failed to register CONVERSION_HOPS");

    /// Natural-language parse requests by parser and outcome
    pub static ref ASSISTANT_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "specref_assistant_requests_total",
        "Total number of natural-language parse requests",
        &["parser", "outcome"]
    )
    .expect("Failed to register ASSISTANT_REQUESTS_TOTAL");

    // Reference Data Metrics

    /// Units in the loaded catalog
    pub static ref CATALOG_UNITS: IntGauge = register_int_gauge!(
        "specref_catalog_units",
        "Number of units in the loaded catalog"
    )
    .expect("Failed to register CATALOG_UNITS");

    /// Records loaded per dataset
    pub static ref DATASET_RECORDS: IntGaugeVec = register_int_gauge_vec!(
        "specref_dataset_records",
        "Number of records loaded per reference dataset",
        &["dataset"]
    )
    .expect("Failed to register DATASET_RECORDS");
}

/// Record one conversion attempt.
pub fn record_conversion(
    endpoint: &str,
    outcome: std::result::Result<usize, &ConversionError>,
) {
    match outcome {
        Ok(hops) => {
            CONVERSIONS_TOTAL.with_label_values(&[endpoint, "ok"]).inc();
            CONVERSION_HOPS
                .with_label_values(&[endpoint])
                .observe(hops as f64);
        }
        Err(err) => {
            CONVERSIONS_TOTAL
                .with_label_values(&[endpoint, err.kind().as_str()])
                .inc();
        }
    }
}

/// Collapse a request path to a bounded set of labels.
pub fn sanitize_path(path: &str) -> String {
    match path {
        "/" | "/health" | "/metrics" => path.to_string(),
        _ => {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            match segments.as_slice() {
                ["api", endpoint] if is_api_endpoint(endpoint) => format!("/api/{endpoint}"),
                ["api", ..] => "/api/{other}".to_string(),
                _ => "/{other}".to_string(),
            }
        }
    }
}

fn is_api_endpoint(segment: &str) -> bool {
    matches!(segment, "specs" | "units" | "components" | "convert" | "solve")
}
