//! Resilience patterns for transient failures
//!
//! Generic retry logic with exponential backoff and cooperative
//! cancellation. The executor is generic over the error type, so the same
//! machinery drives HTTP-level retries in the infrastructure layer and
//! caller-invoked retries of whole business operations.

pub mod retry;

pub use retry::{
    policies, retry, retry_with_policy, BackoffStrategy, RetryConfig, RetryConfigBuilder,
    RetryDecision, RetryError, RetryExecutor, RetryPolicy, RetryResult,
};
