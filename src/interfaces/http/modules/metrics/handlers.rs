//! Prometheus scrape endpoint
//!
//! `GET /metrics` renders whatever the global recorder has collected.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Install the global Prometheus recorder and describe the checkout metrics.
///
/// Fails if a recorder is already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!("checkout_sessions_created_total", "Checkout sessions created");
    metrics::describe_counter!(
        "checkout_step_transitions_total",
        "Successful forward moves between checkout steps"
    );
    metrics::describe_counter!(
        "checkout_validation_failures_total",
        "Step or payment submissions blocked by field errors"
    );
    metrics::describe_counter!("checkout_payments_total", "Settled payments by outcome");
    metrics::describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request latency"
    );

    Ok(handle)
}

pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
