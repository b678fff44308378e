use std::time::Duration;

use async_trait::async_trait;
use eka_domain::{ClientConfig, EkaError, Result, TransportErrorKind};
use reqwest::Client as ReqwestClient;
use tracing::debug;

use super::interceptor::{HttpRequest, HttpResponse, HttpSender};
use crate::errors::into_domain;

/// [`HttpSender`] backed by a shared reqwest client.
///
/// The client applies the overall and connect timeouts; reading the body is
/// bounded separately by the response timeout.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: ReqwestClient,
    response_timeout: Duration,
}

impl ReqwestSender {
    /// Build a reqwest client from the configured timeouts.
    ///
    /// # Errors
    /// Returns `EkaError::Config` if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .no_proxy()
            .build()
            .map_err(|err| EkaError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self::from_client(client, config.response_timeout))
    }

    /// Reuse an existing reqwest client (connection pool included).
    pub fn from_client(client: ReqwestClient, response_timeout: Duration) -> Self {
        Self { client, response_timeout }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder =
            self.client.request(request.method, request.url).headers(request.headers);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(into_domain)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = match tokio::time::timeout(self.response_timeout, response.bytes()).await {
            Ok(read) => read.map_err(into_domain)?.to_vec(),
            Err(_) => {
                debug!(status, "response body not received in time");
                return Err(EkaError::transport(
                    TransportErrorKind::Timeout,
                    format!("response body not received within {:?}", self.response_timeout),
                ));
            }
        };

        Ok(HttpResponse { status, headers, body })
    }
}
