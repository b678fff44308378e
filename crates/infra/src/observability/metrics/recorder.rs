//! Request metrics sink
//!
//! The transport reports one [`RequestSample`] per exchange. Where it goes is
//! up to the [`MetricsRecorder`]: the `metrics` facade by default, or memory
//! for inspection.

use std::fmt;
use std::time::Duration;

/// Counter of finished exchanges, labelled by method, path and outcome.
pub const REQUESTS_TOTAL: &str = "eka_http_requests_total";
/// Histogram of exchange durations in seconds, labelled by method and path.
pub const REQUEST_DURATION_SECONDS: &str = "eka_http_request_duration_seconds";

/// How an exchange ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
    /// A response with status below 400.
    Success,
    /// A response with status 400 or above.
    HttpError,
    /// No response (transport failure, rejected before sending).
    Failure,
}

impl RequestOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::HttpError => "http_error",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finished exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSample {
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub outcome: RequestOutcome,
    pub duration: Duration,
}

/// Destination for request samples. Must not block.
pub trait MetricsRecorder: Send + Sync {
    fn record_request(&self, sample: &RequestSample);
}

/// Emits through the global `metrics` facade.
///
/// Without an installed exporter the calls are no-ops, so this is a safe
/// default for library code.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsFacadeRecorder;

impl MetricsFacadeRecorder {
    /// Register descriptions with the installed exporter.
    pub fn describe() {
        ::metrics::describe_counter!(REQUESTS_TOTAL, "Finished HTTP exchanges with the Eka API");
        ::metrics::describe_histogram!(
            REQUEST_DURATION_SECONDS,
            ::metrics::Unit::Seconds,
            "Duration of HTTP exchanges with the Eka API, retries included"
        );
    }
}

impl MetricsRecorder for MetricsFacadeRecorder {
    fn record_request(&self, sample: &RequestSample) {
        ::metrics::counter!(
            REQUESTS_TOTAL,
            "method" => sample.method.clone(),
            "path" => sample.path.clone(),
            "outcome" => sample.outcome.as_str()
        )
        .increment(1);
        ::metrics::histogram!(
            REQUEST_DURATION_SECONDS,
            "method" => sample.method.clone(),
            "path" => sample.path.clone()
        )
        .record(sample.duration.as_secs_f64());
    }
}
