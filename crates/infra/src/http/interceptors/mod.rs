//! Built-in interceptors
//!
//! The default chain, outermost first, is logging, metrics, auth check and
//! retry: a retried call is logged and measured once, and a 401 is seen by
//! the auth check after retries have settled.

mod auth_check;
mod logging;
mod metrics;
mod retry;

use std::sync::Arc;

use eka_core::CredentialsProvider;
use eka_domain::ClientConfig;

pub use auth_check::AuthCheckInterceptor;
pub use logging::LoggingInterceptor;
pub use metrics::MetricsInterceptor;
pub use retry::RetryInterceptor;

use super::interceptor::Interceptor;
use crate::observability::MetricsRecorder;

/// Interceptors for calls made on behalf of API callers.
pub fn default_chain(
    config: &ClientConfig,
    recorder: Arc<dyn MetricsRecorder>,
    provider: Arc<dyn CredentialsProvider>,
) -> Vec<Arc<dyn Interceptor>> {
    vec![
        Arc::new(LoggingInterceptor),
        Arc::new(MetricsInterceptor::new(recorder)),
        Arc::new(AuthCheckInterceptor::new(provider)),
        Arc::new(RetryInterceptor::from_config(config)),
    ]
}

/// Interceptors for the token exchange itself. No auth check: those calls
/// authenticate through their body.
pub fn exchange_chain(
    config: &ClientConfig,
    recorder: Arc<dyn MetricsRecorder>,
) -> Vec<Arc<dyn Interceptor>> {
    vec![
        Arc::new(LoggingInterceptor),
        Arc::new(MetricsInterceptor::new(recorder)),
        Arc::new(RetryInterceptor::from_config(config)),
    ]
}
