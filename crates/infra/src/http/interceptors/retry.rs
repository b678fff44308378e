use std::time::Duration;

use async_trait::async_trait;
use eka_common::resilience::{
    BackoffStrategy, RetryConfig, RetryDecision, RetryError, RetryExecutor, RetryPolicy,
};
use eka_domain::{ClientConfig, EkaError, Result, TransportErrorKind};
use reqwest::header::RETRY_AFTER;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::http::interceptor::{HttpRequest, HttpResponse, Interceptor, Next};

/// Replays a single HTTP exchange on transient failure.
///
/// Idempotent methods retry on 5xx, 429 and any transport error. POST and
/// PATCH retry only on 429 and on connect failures, where the request never
/// reached the server. A `Retry-After` header in seconds replaces the computed
/// backoff, capped at the backoff ceiling.
#[derive(Debug, Clone)]
pub struct RetryInterceptor {
    config: RetryConfig,
}

impl RetryInterceptor {
    pub fn new(max_retries: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            config: RetryConfig {
                max_retries,
                backoff: BackoffStrategy::Exponential {
                    initial_delay: initial_backoff,
                    base: 2.0,
                    max_delay: Some(max_backoff),
                },
            },
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_retries, config.initial_backoff, config.max_backoff_delay)
    }
}

/// What a single attempt produced, seen through the retry executor.
#[derive(Debug)]
enum AttemptFailure {
    /// A response with a retry-eligible status.
    Status(HttpResponse),
    Error(EkaError),
}

#[derive(Debug, Clone, Copy)]
struct ExchangePolicy {
    idempotent: bool,
    ceiling: Option<Duration>,
}

impl ExchangePolicy {
    fn for_method(method: &Method, ceiling: Option<Duration>) -> Self {
        let idempotent = !matches!(*method, Method::POST | Method::PATCH);
        Self { idempotent, ceiling }
    }

    fn status_is_retryable(&self, status: u16) -> bool {
        status == 429 || (self.idempotent && (500..600).contains(&status))
    }

    fn retry_after(&self, response: &HttpResponse) -> Option<Duration> {
        let seconds = response.header(RETRY_AFTER.as_str())?.trim().parse::<u64>().ok()?;
        let delay = Duration::from_secs(seconds);
        Some(self.ceiling.map_or(delay, |ceiling| delay.min(ceiling)))
    }
}

impl RetryPolicy<AttemptFailure> for ExchangePolicy {
    fn should_retry(&self, failure: &AttemptFailure, _attempt: u32) -> RetryDecision {
        match failure {
            AttemptFailure::Status(response) => match self.retry_after(response) {
                Some(delay) if response.status == 429 => RetryDecision::RetryAfter(delay),
                _ => RetryDecision::Retry,
            },
            AttemptFailure::Error(error) => match error.transport_kind() {
                Some(TransportErrorKind::Connect) => RetryDecision::Retry,
                Some(_) if self.idempotent => RetryDecision::Retry,
                _ => RetryDecision::Stop,
            },
        }
    }
}

#[async_trait]
impl Interceptor for RetryInterceptor {
    async fn intercept(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        let policy = ExchangePolicy::for_method(&request.method, self.config.backoff.ceiling());
        let executor = RetryExecutor::new(self.config.clone(), policy);
        let never = CancellationToken::new();

        let outcome = executor
            .execute(
                || {
                    let request = request.clone();
                    async move {
                        match next.run(request).await {
                            Ok(response) if policy.status_is_retryable(response.status) => {
                                Err(AttemptFailure::Status(response))
                            }
                            Ok(response) => Ok(response),
                            Err(error) => Err(AttemptFailure::Error(error)),
                        }
                    }
                },
                &never,
            )
            .await;

        match outcome {
            Ok(response) => Ok(response),
            Err(RetryError::Exhausted { attempts, source }) => {
                debug!(attempts, path = %request.path(), "Retries exhausted");
                source.into_result()
            }
            Err(RetryError::NonRetryable { source }) => source.into_result(),
            Err(RetryError::Cancelled { .. }) => Err(EkaError::Cancelled),
            Err(RetryError::InvalidConfiguration { message }) => Err(EkaError::Config(message)),
        }
    }
}

impl AttemptFailure {
    /// A retry-eligible response that ran out of retries is still a response;
    /// the transport turns it into an API error.
    fn into_result(self) -> Result<HttpResponse> {
        match self {
            Self::Status(response) => Ok(response),
            Self::Error(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use parking_lot::Mutex;
    use reqwest::header::{HeaderMap, HeaderValue};
    use url::Url;

    use super::*;
    use crate::http::interceptor::HttpSender;

    /// Plays back a fixed script of outcomes, one per call.
    struct Scripted {
        script: Mutex<VecDeque<Result<HttpResponse>>>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(script: Vec<Result<HttpResponse>>) -> Self {
            Self { script: Mutex::new(script.into()), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl HttpSender for Scripted {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.lock().pop_front().unwrap_or_else(|| Ok(status(200)))
        }
    }

    fn status(code: u16) -> HttpResponse {
        HttpResponse { status: code, headers: HeaderMap::new(), body: Vec::new() }
    }

    fn request(method: Method) -> HttpRequest {
        HttpRequest {
            method,
            url: Url::parse("https://api.eka.care/x").unwrap(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            authenticated: false,
        }
    }

    async fn run(method: Method, sender: &Scripted) -> Result<HttpResponse> {
        let chain: Vec<Arc<dyn Interceptor>> = vec![Arc::new(RetryInterceptor::new(
            3,
            Duration::from_millis(1),
            Duration::from_millis(5),
        ))];
        Next::new(&chain, sender).run(request(method)).await
    }

    #[tokio::test]
    async fn get_retries_server_errors() {
        let sender = Scripted::new(vec![Ok(status(500)), Ok(status(502)), Ok(status(200))]);
        let response = run(Method::GET, &sender).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(sender.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn post_does_not_retry_server_errors() {
        let sender = Scripted::new(vec![Ok(status(500)), Ok(status(200))]);
        let response = run(Method::POST, &sender).await.unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(sender.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn post_retries_rate_limiting() {
        let sender = Scripted::new(vec![Ok(status(429)), Ok(status(201))]);
        let response = run(Method::POST, &sender).await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(sender.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn post_retries_connect_failures_only() {
        let sender = Scripted::new(vec![
            Err(EkaError::transport(TransportErrorKind::Connect, "refused")),
            Err(EkaError::transport(TransportErrorKind::Timeout, "slow")),
        ]);
        let error = run(Method::POST, &sender).await.unwrap_err();

        assert_eq!(error.transport_kind(), Some(TransportErrorKind::Timeout));
        assert_eq!(sender.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_response() {
        let sender = Scripted::new((0..4).map(|_| Ok(status(503))).collect());
        let response = run(Method::GET, &sender).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(sender.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn client_errors_are_final() {
        let sender = Scripted::new(vec![Ok(status(404))]);
        let response = run(Method::GET, &sender).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(sender.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn retry_after_is_capped_by_the_ceiling() {
        let policy = ExchangePolicy::for_method(&Method::POST, Some(Duration::from_secs(20)));
        let mut response = status(429);
        response.headers.insert(RETRY_AFTER, HeaderValue::from_static("120"));

        assert_eq!(
            policy.should_retry(&AttemptFailure::Status(response), 0),
            RetryDecision::RetryAfter(Duration::from_secs(20))
        );
    }
}
