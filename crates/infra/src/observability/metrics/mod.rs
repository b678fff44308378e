//! Request metrics
//!
//! Thread-safe sinks for the per-exchange samples emitted by the transport.

pub mod memory;
pub mod recorder;

// Re-export metric types for convenience
pub use memory::InMemoryMetrics;
pub use recorder::{
    MetricsFacadeRecorder, MetricsRecorder, RequestOutcome, RequestSample,
    REQUEST_DURATION_SECONDS, REQUESTS_TOTAL,
};
