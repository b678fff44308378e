//! Generic retry strategy implementation with cancellation support
//!
//! This module provides a retry mechanism usable for any fallible async
//! operation. Delays follow a [`BackoffStrategy`], retry eligibility is decided
//! by a [`RetryPolicy`], and every wait can be aborted through a
//! [`CancellationToken`].

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Errors that can occur during retry operations
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// All retry attempts have been exhausted; carries the last error
    #[error("All retry attempts exhausted after {attempts} tries: {source}")]
    Exhausted { attempts: u32, source: E },

    /// The operation failed with a non-retryable error
    #[error("Operation failed with non-retryable error: {source}")]
    NonRetryable { source: E },

    /// The cancellation token fired before the operation succeeded
    #[error("Retry cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },

    /// The retry strategy configuration is invalid
    #[error("Invalid retry configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl<E> RetryError<E> {
    /// Recover the operation's own error, if one was recorded.
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Exhausted { source, .. } | Self::NonRetryable { source } => Some(source),
            Self::Cancelled { .. } | Self::InvalidConfiguration { .. } => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type for retry operations
pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Trait for determining whether an error should be retried
pub trait RetryPolicy<E> {
    /// Determine if the error should be retried and optionally provide a custom
    /// delay
    fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision;
}

/// Decision for whether to retry an operation
#[derive(Debug, Clone, PartialEq)]
pub enum RetryDecision {
    /// Retry the operation with the default backoff delay
    Retry,
    /// Retry the operation with a custom delay
    RetryAfter(Duration),
    /// Don't retry the operation
    Stop,
}

/// Backoff strategy for calculating retry delays
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffStrategy {
    /// Fixed delay between retries
    Fixed(Duration),
    /// Exponential backoff: initial_delay * base^attempt, optionally capped
    Exponential { initial_delay: Duration, base: f64, max_delay: Option<Duration> },
}

impl BackoffStrategy {
    /// Doubling backoff starting at `initial_delay` with no ceiling.
    pub fn doubling(initial_delay: Duration) -> Self {
        Self::Exponential { initial_delay, base: 2.0, max_delay: None }
    }

    /// Calculate the delay before retry number `attempt` (0-based)
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        match self {
            BackoffStrategy::Fixed(delay) => *delay,
            BackoffStrategy::Exponential { initial_delay, base, max_delay } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let secs = initial_delay.as_secs_f64() * base.powi(exponent);
                let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
                match max_delay {
                    Some(ceiling) => delay.min(*ceiling),
                    None => delay,
                }
            }
        }
    }

    /// Upper bound on any computed delay, if one is configured.
    pub fn ceiling(&self) -> Option<Duration> {
        match self {
            BackoffStrategy::Fixed(delay) => Some(*delay),
            BackoffStrategy::Exponential { max_delay, .. } => *max_delay,
        }
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Number of additional attempts after the first one
    pub max_retries: u32,
    /// Backoff strategy for calculating delays
    pub backoff: BackoffStrategy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffStrategy::Exponential {
                initial_delay: Duration::from_millis(100),
                base: 2.0,
                max_delay: Some(Duration::from_secs(20)),
            },
        }
    }
}

impl RetryConfig {
    /// Create a configuration builder
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RetryError<()>> {
        match &self.backoff {
            BackoffStrategy::Exponential { base, .. } if *base <= 0.0 => {
                Err(RetryError::InvalidConfiguration {
                    message: "exponential base must be greater than 0".to_string(),
                })
            }
            BackoffStrategy::Exponential { initial_delay, max_delay: Some(max), .. }
                if max < initial_delay =>
            {
                Err(RetryError::InvalidConfiguration {
                    message: "max_delay must not be smaller than initial_delay".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for RetryConfig with fluent API
#[derive(Debug)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl Default for RetryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfigBuilder {
    pub fn new() -> Self {
        Self { config: RetryConfig::default() }
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn fixed_backoff(mut self, delay: Duration) -> Self {
        self.config.backoff = BackoffStrategy::Fixed(delay);
        self
    }

    pub fn exponential_backoff(
        mut self,
        initial_delay: Duration,
        base: f64,
        max_delay: Option<Duration>,
    ) -> Self {
        self.config.backoff = BackoffStrategy::Exponential { initial_delay, base, max_delay };
        self
    }

    pub fn build(self) -> Result<RetryConfig, RetryError<()>> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// The main retry executor
#[derive(Debug, Clone)]
pub struct RetryExecutor<P> {
    config: RetryConfig,
    policy: P,
}

impl<P> RetryExecutor<P> {
    /// Create a new retry executor with the given configuration and policy
    pub fn new(config: RetryConfig, policy: P) -> Self {
        Self { config, policy }
    }

    /// Create with default configuration
    pub fn with_policy(policy: P) -> Self {
        Self::new(RetryConfig::default(), policy)
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute an operation with retry logic
    ///
    /// The operation runs once, then up to `max_retries` more times while the
    /// policy allows it. Cancellation is checked before every attempt and
    /// interrupts any pending backoff sleep.
    ///
    /// # Errors
    ///
    /// - [`RetryError::Exhausted`] with the last error once retries run out
    /// - [`RetryError::NonRetryable`] when the policy stops early
    /// - [`RetryError::Cancelled`] when `cancel` fires, regardless of the
    ///   operation's own error
    #[instrument(skip(self, operation, cancel), fields(max_retries = self.config.max_retries))]
    pub async fn execute<F, Fut, T, E>(
        &self,
        mut operation: F,
        cancel: &CancellationToken,
    ) -> RetryResult<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Debug,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(RetryError::Cancelled { attempts: attempt });
            }

            debug!(attempt = attempt + 1, "Executing operation");

            let error = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(RetryError::Cancelled { attempts: attempt + 1 });
                }
                result = operation() => match result {
                    Ok(value) => {
                        if attempt > 0 {
                            debug!(
                                retries = attempt,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "Operation succeeded after retries"
                            );
                        }
                        return Ok(value);
                    }
                    Err(error) => error,
                },
            };

            if attempt >= self.config.max_retries {
                warn!(attempts = attempt + 1, error = ?error, "All retry attempts exhausted");
                return Err(RetryError::Exhausted { attempts: attempt + 1, source: error });
            }

            let delay = match self.policy.should_retry(&error, attempt) {
                RetryDecision::Stop => {
                    debug!(error = ?error, "Retry policy determined not to retry");
                    return Err(RetryError::NonRetryable { source: error });
                }
                RetryDecision::Retry => self.config.backoff.calculate_delay(attempt),
                RetryDecision::RetryAfter(custom_delay) => custom_delay,
            };

            warn!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "Operation failed, retrying");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(attempts = attempt + 1, "Retry cancelled during backoff");
                    return Err(RetryError::Cancelled { attempts: attempt + 1 });
                }
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }
}

/// Convenience function to create a retry executor and execute an operation
pub async fn retry_with_policy<F, Fut, T, E, P>(
    config: RetryConfig,
    policy: P,
    operation: F,
    cancel: &CancellationToken,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: RetryPolicy<E>,
    E: fmt::Debug,
{
    let executor = RetryExecutor::new(config, policy);
    executor.execute(operation, cancel).await
}

/// Retry any error with doubling backoff: `initial_delay * 2^attempt`.
///
/// Makes up to `max_retries` additional attempts with no delay ceiling.
pub async fn retry<F, Fut, T, E>(
    operation: F,
    max_retries: u32,
    initial_delay: Duration,
    cancel: &CancellationToken,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    let config = RetryConfig { max_retries, backoff: BackoffStrategy::doubling(initial_delay) };
    retry_with_policy(config, policies::AlwaysRetry, operation, cancel).await
}

/// Pre-defined retry policies for common scenarios
pub mod policies {
    use super::*;

    /// Always retry policy - retries on any error
    #[derive(Debug, Clone)]
    pub struct AlwaysRetry;

    impl<E> RetryPolicy<E> for AlwaysRetry {
        fn should_retry(&self, _error: &E, _attempt: u32) -> RetryDecision {
            RetryDecision::Retry
        }
    }

    /// Never retry policy - never retries
    #[derive(Debug, Clone)]
    pub struct NeverRetry;

    impl<E> RetryPolicy<E> for NeverRetry {
        fn should_retry(&self, _error: &E, _attempt: u32) -> RetryDecision {
            RetryDecision::Stop
        }
    }

    /// Predicate-based retry policy
    #[derive(Debug, Clone)]
    pub struct PredicateRetry<F> {
        predicate: F,
    }

    impl<F> PredicateRetry<F> {
        pub fn new(predicate: F) -> Self {
            Self { predicate }
        }
    }

    impl<F, E> RetryPolicy<E> for PredicateRetry<F>
    where
        F: Fn(&E, u32) -> bool,
    {
        fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision {
            if (self.predicate)(error, attempt) {
                RetryDecision::Retry
            } else {
                RetryDecision::Stop
            }
        }
    }
}
