use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics exporter.
///
/// Safe to call more than once (e.g. several services in one test
/// process); the first call installs the recorder, later calls reuse it.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("Failed to install Prometheus recorder");
            init_metric_descriptions();
            handle
        })
        .clone()
}

fn init_metric_descriptions() {
    describe_counter!(
        "tracelink_log_records_total",
        "Total number of log records ingested by the collector"
    );
    describe_counter!(
        "tracelink_forwards_total",
        "Total number of downstream forward attempts"
    );
    describe_counter!(
        "tracelink_errors_total",
        "Total number of request handling errors"
    );
}

/// Record an ingested log record
pub fn record_ingest(service: &str, level: &str) {
    counter!(
        "tracelink_log_records_total",
        "service" => service.to_string(),
        "level" => level.to_string(),
    )
    .increment(1);
}

/// Record a downstream forward attempt
pub fn record_forward(service: &str) {
    counter!(
        "tracelink_forwards_total",
        "service" => service.to_string(),
    )
    .increment(1);
}

/// Record a request handling error
pub fn record_error(service: &str, error_type: &str) {
    counter!(
        "tracelink_errors_total",
        "service" => service.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}
