use std::sync::Arc;

use async_trait::async_trait;
use eka_core::CredentialsProvider;
use eka_domain::{EkaError, Result};
use tracing::warn;

use crate::http::interceptor::{HttpRequest, HttpResponse, Interceptor, Next};

/// Guards authenticated calls.
///
/// An authenticated request without a bearer token is rejected before it is
/// sent. A 401 answer invalidates the token that was used, so the next call
/// re-authenticates instead of replaying a dead token.
#[derive(Clone)]
pub struct AuthCheckInterceptor {
    provider: Arc<dyn CredentialsProvider>,
}

impl AuthCheckInterceptor {
    pub fn new(provider: Arc<dyn CredentialsProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Interceptor for AuthCheckInterceptor {
    async fn intercept(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        if !request.authenticated {
            return next.run(request).await;
        }

        let Some(token) = request.bearer_token().map(str::to_owned) else {
            return Err(EkaError::Config(format!(
                "authenticated request to {} has no bearer token",
                request.path()
            )));
        };
        let path = request.path().to_string();

        let response = next.run(request).await?;
        if response.status == 401 {
            warn!(%path, "Bearer token rejected, invalidating cached credentials");
            self.provider.invalidate(&token);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use eka_domain::{CredentialOrigin, Credentials, ErrorKind};
    use parking_lot::Mutex;
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
    use reqwest::Method;
    use url::Url;

    use super::*;
    use crate::http::interceptor::HttpSender;

    #[derive(Default)]
    struct RecordingProvider {
        invalidated: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CredentialsProvider for RecordingProvider {
        async fn retrieve(&self, _context: &str) -> Result<Credentials> {
            Ok(Credentials::non_expiring("tok", CredentialOrigin::Static))
        }

        fn invalidate(&self, access_token: &str) {
            self.invalidated.lock().push(access_token.to_string());
        }
    }

    struct FixedStatus(u16);

    #[async_trait]
    impl HttpSender for FixedStatus {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            Ok(HttpResponse { status: self.0, headers: HeaderMap::new(), body: Vec::new() })
        }
    }

    fn request(authenticated: bool, bearer: Option<&'static str>) -> HttpRequest {
        let mut headers = HeaderMap::new();
        if let Some(bearer) = bearer {
            headers.insert(AUTHORIZATION, HeaderValue::from_static(bearer));
        }
        HttpRequest {
            method: Method::GET,
            url: Url::parse("https://api.eka.care/abdm/v1/profile").unwrap(),
            headers,
            body: None,
            timeout: None,
            authenticated,
        }
    }

    async fn run(
        provider: Arc<RecordingProvider>,
        status: u16,
        request: HttpRequest,
    ) -> Result<HttpResponse> {
        let chain: Vec<Arc<dyn Interceptor>> = vec![Arc::new(AuthCheckInterceptor::new(provider))];
        let sender = FixedStatus(status);
        Next::new(&chain, &sender).run(request).await
    }

    #[tokio::test]
    async fn missing_bearer_is_rejected_before_sending() {
        let provider = Arc::new(RecordingProvider::default());
        let error = run(provider, 200, request(true, None)).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[tokio::test]
    async fn unauthorized_answer_invalidates_the_used_token() {
        let provider = Arc::new(RecordingProvider::default());
        let response = run(provider.clone(), 401, request(true, Some("Bearer stale"))).await.unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(*provider.invalidated.lock(), vec!["stale".to_string()]);
    }

    #[tokio::test]
    async fn unauthenticated_requests_pass_through() {
        let provider = Arc::new(RecordingProvider::default());
        let response = run(provider.clone(), 401, request(false, None)).await.unwrap();

        assert_eq!(response.status, 401);
        assert!(provider.invalidated.lock().is_empty());
    }
}
