//! Counting fake for the `AuthExchange` port

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use eka_core::AuthExchange;
use eka_domain::{Result as DomainResult, TokenResponse};

/// In-memory token endpoint.
///
/// Every exchange sleeps for the configured latency before answering, which
/// lets tests hold a login in flight while other callers pile up or while a
/// timeout fires.
#[derive(Debug, Default)]
pub struct SlowExchange {
    latency_ms: AtomicU64,
    login_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl SlowExchange {
    pub fn with_latency(latency: Duration) -> Self {
        let exchange = Self::default();
        exchange.set_latency(latency);
        exchange
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
    }
}

#[async_trait]
impl AuthExchange for SlowExchange {
    async fn login(&self, _client_id: &str, _client_secret: &str) -> DomainResult<TokenResponse> {
        self.wait().await;
        let n = self.login_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TokenResponse {
            access_token: format!("access-{n}"),
            expires_in: 3600,
            refresh_expires_in: 86_400,
            refresh_token: format!("refresh-{n}"),
        })
    }

    async fn refresh(&self, _access: &str, _refresh: &str) -> DomainResult<TokenResponse> {
        self.wait().await;
        let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TokenResponse {
            access_token: format!("refreshed-{n}"),
            expires_in: 3600,
            refresh_expires_in: 86_400,
            refresh_token: format!("refresh-r{n}"),
        })
    }
}
