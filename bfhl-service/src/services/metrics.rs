//! Metrics collection and Prometheus export.
//!
//! Installs the global `metrics` recorder that the HTTP middleware and the
//! dispatcher write to, and renders it for the /metrics endpoint.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Call once at startup before any metrics are recorded. A second call
/// fails because the global recorder is already taken.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            metrics_exporter_prometheus::Matcher::Full("bfhl_ai_latency_seconds".to_string()),
            &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0],
        )
        .and_then(|builder| builder.install_recorder())
        .map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
        })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!("metrics handle already initialized"))
    })
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}
