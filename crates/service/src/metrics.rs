use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

use crate::errors::CartStoreError;

// Prometheus metrics (default registry)
pub static STORE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cartservice_store_operations_total",
        "Cart store operations by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register store_operations_total")
});

pub static STORE_OPERATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "cartservice_store_operation_duration_seconds",
        "Cart store operation duration in seconds",
        &["operation"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("register store_operation_duration")
});

pub fn record<T>(operation: &str, result: &Result<T, CartStoreError>, elapsed: Duration) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    STORE_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
    STORE_OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(elapsed.as_secs_f64());
}
