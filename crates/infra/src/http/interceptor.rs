//! Interceptor chain around the wire exchange
//!
//! A request travels through every registered [`Interceptor`] in registration
//! order, outermost first, and finally reaches the [`HttpSender`]. Each
//! interceptor decides whether and how often to call [`Next::run`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eka_domain::Result;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

/// A fully assembled outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Per-request timeout, overriding the client-wide one.
    pub timeout: Option<Duration>,
    /// Whether the call must carry a bearer token.
    pub authenticated: bool,
}

impl HttpRequest {
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Token from the `Authorization: Bearer ...` header, if present.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .filter(|token| !token.is_empty())
    }
}

/// Raw response as received from the network.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Status below 400.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }
}

/// Performs the actual network exchange at the end of the chain.
#[async_trait]
pub trait HttpSender: Send + Sync {
    /// Send one request and read the full response.
    ///
    /// # Errors
    /// Network failures surface as `EkaError::Transport`. A response with
    /// any status code is a success at this level.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Middleware around a single HTTP exchange.
#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn intercept(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse>;
}

/// The remainder of the chain after the current interceptor.
///
/// `Next` is `Copy`, so an interceptor may run the rest of the chain more
/// than once (retries).
#[derive(Clone, Copy)]
pub struct Next<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    sender: &'a dyn HttpSender,
}

impl<'a> Next<'a> {
    pub fn new(interceptors: &'a [Arc<dyn Interceptor>], sender: &'a dyn HttpSender) -> Self {
        Self { interceptors, sender }
    }

    /// Pass the request to the next interceptor, or to the sender when the
    /// chain is exhausted.
    pub async fn run(self, request: HttpRequest) -> Result<HttpResponse> {
        match self.interceptors.split_first() {
            Some((current, rest)) => {
                current.intercept(request, Next { interceptors: rest, sender: self.sender }).await
            }
            None => self.sender.send(request).await,
        }
    }
}
