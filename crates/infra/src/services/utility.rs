//! Local helpers exposed next to the API facades
//!
//! Nothing here touches the network. Validators reject malformed identifiers
//! before a request is built; the retry helper lets callers wrap whole
//! business operations.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use eka_common::resilience::{retry, RetryError};
use eka_common::{time, utils, validation};
use eka_domain::{EkaError, Result};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::errors::into_domain;

/// Identifier generation, validation and date helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityService;

impl UtilityService {
    pub fn new() -> Self {
        Self
    }

    /// Fresh transaction id: 16 random bytes, hex-encoded
    pub fn generate_transaction_id(&self) -> String {
        utils::generate_transaction_id()
    }

    /// # Errors
    ///
    /// `EkaError::Validation` on `aadhaar_number` unless the value is exactly
    /// 12 digits
    pub fn validate_aadhaar_number(&self, value: &str) -> Result<()> {
        validation::validate_aadhaar_number(value).map_err(into_domain)
    }

    /// # Errors
    ///
    /// `EkaError::Validation` on `mobile_number` unless the value is exactly
    /// 10 digits
    pub fn validate_mobile_number(&self, value: &str) -> Result<()> {
        validation::validate_mobile_number(value).map_err(into_domain)
    }

    /// # Errors
    ///
    /// `EkaError::Validation` on `abha_address` unless the value is a handle
    /// followed by `@abdm`
    pub fn validate_abha_address(&self, value: &str) -> Result<()> {
        validation::validate_abha_address(value).map_err(into_domain)
    }

    /// Render a date as `YYYY-MM-DD`
    pub fn format_date(&self, year: i32, month: u32, day: u32) -> String {
        time::format_date(year, month, day)
    }

    /// # Errors
    ///
    /// `EkaError::Validation` on `date` when the input is not a real
    /// `YYYY-MM-DD` date
    pub fn parse_date(&self, value: &str) -> Result<NaiveDate> {
        time::parse_date(value).map_err(into_domain)
    }

    /// Run `operation` until it succeeds, retrying any error
    ///
    /// Waits `initial_delay * 2^attempt` between attempts and makes at most
    /// `max_retries` extra attempts.
    ///
    /// # Errors
    ///
    /// The last operation error once attempts run out, or
    /// `EkaError::Cancelled` as soon as `cancel` fires
    pub async fn retry_with_backoff<F, Fut, T>(
        &self,
        operation: F,
        max_retries: u32,
        initial_delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        retry(operation, max_retries, initial_delay, cancel).await.map_err(from_retry_error)
    }

    /// Whether a retry could plausibly succeed: transport failures, 5xx and 429
    pub fn is_retryable(&self, error: &EkaError) -> bool {
        error.is_retryable()
    }
}

fn from_retry_error(error: RetryError<EkaError>) -> EkaError {
    match error {
        RetryError::Cancelled { attempts } => {
            warn!(attempts, "Retry cancelled");
            EkaError::Cancelled
        }
        RetryError::InvalidConfiguration { message } => EkaError::Config(message),
        other => other.into_source().unwrap_or(EkaError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use eka_domain::{ErrorKind, TransportErrorKind};

    use super::*;

    #[test]
    fn mobile_number_needs_ten_digits() {
        let utils = UtilityService::new();

        let error = utils.validate_mobile_number("987654321").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(utils.validate_mobile_number("9876543210").is_ok());
    }

    #[test]
    fn validators_name_the_offending_field() {
        let utils = UtilityService::new();

        match utils.validate_aadhaar_number("1234").unwrap_err() {
            EkaError::Validation { field, .. } => assert_eq!(field, "aadhaar_number"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(utils.validate_aadhaar_number("123456789012").is_ok());
        assert!(utils.validate_abha_address("asha@abdm").is_ok());
        assert!(utils.validate_abha_address("@abdm").is_err());
        assert!(utils.validate_abha_address("asha").is_err());
    }

    #[test]
    fn dates_round_trip_through_wire_format() {
        let utils = UtilityService::new();

        assert_eq!(utils.format_date(1990, 4, 7), "1990-04-07");
        assert_eq!(utils.parse_date("1990-04-07").unwrap(), NaiveDate::from_ymd_opt(1990, 4, 7).unwrap());
        assert_eq!(utils.parse_date("1990-02-30").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn transaction_ids_are_unique_hex() {
        let utils = UtilityService::new();
        let ids: std::collections::HashSet<String> =
            (0..10_000).map(|_| utils.generate_transaction_id()).collect();

        assert_eq!(ids.len(), 10_000);
        assert!(ids.iter().all(|id| id.len() == 32 && id.chars().all(|c| c.is_ascii_hexdigit())));
    }

    #[tokio::test]
    async fn retry_returns_last_error_when_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = UtilityService::new()
            .retry_with_backoff(
                move || {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    async move {
                        Err(EkaError::transport(TransportErrorKind::Connect, format!("attempt {attempt}")))
                    }
                },
                2,
                Duration::from_millis(1),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result.unwrap_err() {
            EkaError::Transport { message, .. } => assert_eq!(message, "attempt 2"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn retry_stops_with_cancelled_when_token_fires() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result: Result<()> = UtilityService::new()
            .retry_with_backoff(
                || async { Err(EkaError::Decode("nope".into())) },
                5,
                Duration::from_secs(60),
                &cancel,
            )
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn retry_succeeds_after_transient_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let value = UtilityService::new()
            .retry_with_backoff(
                move || {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if attempt == 0 {
                            Err(EkaError::transport(TransportErrorKind::Timeout, "slow"))
                        } else {
                            Ok(attempt)
                        }
                    }
                },
                3,
                Duration::from_millis(1),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert!(UtilityService::new().is_retryable(&EkaError::transport(TransportErrorKind::Timeout, "slow")));
    }
}
