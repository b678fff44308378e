//! In-memory request metrics for tests and diagnostics
//!
//! ## Design
//! - **VecDeque ring buffer** of the most recent samples, O(1) eviction
//! - **Atomic counters** per outcome, never evicted
//! - **parking_lot mutex**, no poisoning to recover from

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::recorder::{MetricsRecorder, RequestOutcome, RequestSample};
use crate::observability::{MetricsError, MetricsResult};

const DEFAULT_CAPACITY: usize = 1000;

/// Keeps the last N request samples plus running totals.
#[derive(Debug)]
pub struct InMemoryMetrics {
    capacity: usize,
    samples: Mutex<VecDeque<RequestSample>>,
    success: AtomicU64,
    http_error: AtomicU64,
    failure: AtomicU64,
}

impl Default for InMemoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
            success: AtomicU64::new(0),
            http_error: AtomicU64::new(0),
            failure: AtomicU64::new(0),
        }
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> Vec<RequestSample> {
        self.samples.lock().iter().cloned().collect()
    }

    pub fn count(&self, outcome: RequestOutcome) -> u64 {
        self.counter(outcome).load(Ordering::Relaxed)
    }

    pub fn total_requests(&self) -> u64 {
        [RequestOutcome::Success, RequestOutcome::HttpError, RequestOutcome::Failure]
            .into_iter()
            .map(|outcome| self.count(outcome))
            .sum()
    }

    /// P50 duration of the retained samples.
    ///
    /// Returns `MetricsError::EmptyData` if nothing was recorded.
    pub fn p50(&self) -> MetricsResult<Duration> {
        self.percentile(0.50, "P50")
    }

    /// P95 duration of the retained samples.
    ///
    /// Returns `MetricsError::EmptyData` if nothing was recorded.
    pub fn p95(&self) -> MetricsResult<Duration> {
        self.percentile(0.95, "P95")
    }

    pub fn reset(&self) {
        self.samples.lock().clear();
        for outcome in [RequestOutcome::Success, RequestOutcome::HttpError, RequestOutcome::Failure]
        {
            self.counter(outcome).store(0, Ordering::Relaxed);
        }
    }

    fn counter(&self, outcome: RequestOutcome) -> &AtomicU64 {
        match outcome {
            RequestOutcome::Success => &self.success,
            RequestOutcome::HttpError => &self.http_error,
            RequestOutcome::Failure => &self.failure,
        }
    }

    fn percentile(&self, percentile: f64, metric: &'static str) -> MetricsResult<Duration> {
        let samples = self.samples.lock();
        if samples.is_empty() {
            return Err(MetricsError::EmptyData { metric });
        }

        let mut sorted: Vec<Duration> = samples.iter().map(|sample| sample.duration).collect();
        sorted.sort_unstable();

        let index = ((sorted.len() as f64 * percentile) as usize).min(sorted.len() - 1);
        Ok(sorted[index])
    }
}

impl MetricsRecorder for InMemoryMetrics {
    fn record_request(&self, sample: &RequestSample) {
        self.counter(sample.outcome).fetch_add(1, Ordering::Relaxed);

        let mut samples = self.samples.lock();
        samples.push_back(sample.clone());
        if samples.len() > self.capacity {
            samples.pop_front();
        }
    }
}
