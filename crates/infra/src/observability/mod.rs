//! Observability for the client: tracing setup and request metrics
//!
//! ## Design Principles
//!
//! 1. **Library stays passive**: the client only emits `tracing` events and
//!    metric samples. Installing a subscriber or exporter is the
//!    application's call ([`init_tracing`], any `metrics` exporter).
//!
//! 2. **Pluggable sink**: the transport reports through [`MetricsRecorder`];
//!    [`MetricsFacadeRecorder`] forwards to the `metrics` facade and
//!    [`InMemoryMetrics`] keeps samples for inspection.
//!
//! 3. **No secrets**: the `Authorization` header never reaches a log line.

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, init_tracing_with, LogFormat};
pub use metrics::{
    InMemoryMetrics, MetricsFacadeRecorder, MetricsRecorder, RequestOutcome, RequestSample,
};

/// Metrics error type
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Empty data set - cannot calculate aggregate metric
    #[error("Empty data: cannot calculate {metric}")]
    EmptyData {
        /// Metric name that failed (e.g., "P95", "P50")
        metric: &'static str,
    },
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
