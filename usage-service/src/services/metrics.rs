//! Metrics module for usage-service.
//! Provides Prometheus metrics for raw usage window computation.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram, register_int_counter, register_int_counter_vec,
    Encoder, Histogram, IntCounter, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Days between the first event date and the optimized start date.
pub static WINDOW_DAYS_SAVED: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(histogram_opts!(
        "usage_window_days_saved",
        "Days of raw usage skipped by the window optimizer",
        vec![0.0, 1.0, 7.0, 30.0, 90.0, 180.0, 365.0, 730.0, 1825.0]
    ))
    .expect("Failed to register WINDOW_DAYS_SAVED")
});

/// Window computations by outcome
pub static WINDOW_COMPUTATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Raw usage rows returned by providers
pub static RAW_ROWS_FETCHED_TOTAL: OnceLock<IntCounter> = OnceLock::new();

/// Error counter for alerting
pub static ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    WINDOW_COMPUTATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "usage_window_computations_total",
                "Raw usage window computations by outcome"
            ),
            &["outcome"]
        )
        .expect("Failed to register WINDOW_COMPUTATIONS_TOTAL")
    });

    RAW_ROWS_FETCHED_TOTAL.get_or_init(|| {
        register_int_counter!(opts!(
            "usage_raw_rows_fetched_total",
            "Raw usage rows fetched for arrears invoicing"
        ))
        .expect("Failed to register RAW_ROWS_FETCHED_TOTAL")
    });

    ERRORS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!("usage_errors_total", "Total errors by type for alerting"),
            &["error_type"]
        )
        .expect("Failed to register ERRORS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*WINDOW_DAYS_SAVED;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record a window computation and how many days it skipped.
pub fn record_window_computation(outcome: &str, days_saved: i64) {
    if let Some(counter) = WINDOW_COMPUTATIONS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
    WINDOW_DAYS_SAVED.observe(days_saved.max(0) as f64);
}

/// Record raw usage rows fetched.
pub fn record_raw_rows_fetched(count: usize) {
    if let Some(counter) = RAW_ROWS_FETCHED_TOTAL.get() {
        counter.inc_by(count as u64);
    }
}

/// Record an error for alerting.
pub fn record_error(error_type: &str) {
    if let Some(counter) = ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type]).inc();
    }
}
