use std::time::Instant;

use async_trait::async_trait;
use eka_domain::Result;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use tracing::{debug, warn};

use crate::http::interceptor::{HttpRequest, HttpResponse, Interceptor, Next};

/// Emits a tracing event per exchange. The `Authorization` header is never
/// logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        let method = request.method.clone();
        let path = request.path().to_string();
        let started = Instant::now();

        debug!(
            %method,
            %path,
            authenticated = request.authenticated,
            headers = ?loggable_headers(&request.headers),
            "Sending request"
        );

        let result = next.run(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) if response.is_success() => {
                debug!(%method, %path, status = response.status, elapsed_ms, "Request completed");
            }
            Ok(response) => {
                warn!(%method, %path, status = response.status, elapsed_ms, "Request rejected");
            }
            Err(error) => {
                warn!(%method, %path, elapsed_ms, error = %error, "Request failed");
            }
        }

        result
    }
}

/// Header names and values with credentials masked.
pub(crate) fn loggable_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                "[redacted]".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn authorization_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret-token"));
        headers.insert("x-user-id", HeaderValue::from_static("u-1"));

        let shown = loggable_headers(&headers);

        assert!(shown.iter().all(|(_, value)| !value.contains("secret-token")));
        assert!(shown.contains(&("authorization".to_string(), "[redacted]".to_string())));
        assert!(shown.contains(&("x-user-id".to_string(), "u-1".to_string())));
    }
}
