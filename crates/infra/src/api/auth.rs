//! Token exchange over HTTP
//!
//! Implements the [`AuthExchange`] port against the connect-auth endpoints.
//! Both calls authenticate through their body, never through a bearer
//! header, and run on a transport without the auth-check interceptor.

use std::sync::Arc;

use async_trait::async_trait;
use eka_core::AuthExchange;
use eka_domain::constants::paths;
use eka_domain::{EkaError, LoginRequest, RefreshRequest, Result, TokenResponse};
use tracing::{debug, info, instrument};

use crate::http::{ApiRequest, HttpTransport};

/// Login and refresh calls against the Eka token endpoints
pub struct HttpAuthExchange {
    transport: Arc<HttpTransport>,
}

impl HttpAuthExchange {
    /// Create a new exchange
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport without the auth-check interceptor
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    async fn exchange<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<TokenResponse> {
        let request = ApiRequest::post(path).json(body)?.unauthenticated();
        self.transport.execute_json(request, None).await.map_err(into_auth_error)
    }
}

#[async_trait]
impl AuthExchange for HttpAuthExchange {
    #[instrument(skip(self, client_secret))]
    async fn login(&self, client_id: &str, client_secret: &str) -> Result<TokenResponse> {
        let body = LoginRequest {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };
        let tokens = self.exchange(paths::AUTH_LOGIN, &body).await?;

        info!(expires_in = tokens.expires_in, "Client login accepted");
        Ok(tokens)
    }

    #[instrument(skip_all)]
    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<TokenResponse> {
        let body = RefreshRequest {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        let tokens = self.exchange(paths::AUTH_REFRESH, &body).await?;

        debug!(expires_in = tokens.expires_in, "Token refresh accepted");
        Ok(tokens)
    }
}

/// A rejected token exchange is an authentication failure, not a plain API
/// error, so callers never mistake it for something a retry could fix.
fn into_auth_error(error: EkaError) -> EkaError {
    match error {
        EkaError::Api(details) => EkaError::Auth(details),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use eka_domain::{ClientConfig, ErrorKind};
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::ReqwestSender;

    fn exchange(server: &MockServer) -> HttpAuthExchange {
        let config = ClientConfig::builder().base_url(server.uri()).build().unwrap();
        let sender = Arc::new(ReqwestSender::new(&config).unwrap());
        HttpAuthExchange::new(Arc::new(HttpTransport::new(&config, sender)))
    }

    #[tokio::test]
    async fn login_posts_client_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect-auth/v1/account/login"))
            .and(body_json(serde_json::json!({"client_id": "id", "client_secret": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a1",
                "expires_in": 3600,
                "refresh_expires_in": 86400,
                "refresh_token": "r1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = exchange(&server).login("id", "secret").await.unwrap();

        assert_eq!(tokens.access_token, "a1");
        assert_eq!(tokens.refresh_token, "r1");
        assert_eq!(tokens.expires_in, 3600);
    }

    #[tokio::test]
    async fn refresh_sends_no_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/connect-auth/v1/account/refresh"))
            .and(body_json(serde_json::json!({"access_token": "a1", "refresh_token": "r1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a2",
                "expires_in": 3600,
                "refresh_expires_in": 86400,
                "refresh_token": "r2"
            })))
            .mount(&server)
            .await;

        let tokens = exchange(&server).refresh("a1", "r1").await.unwrap();
        assert_eq!(tokens.access_token, "a2");
    }

    #[tokio::test]
    async fn rejected_login_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": 401,
                "error": "invalid client credentials"
            })))
            .mount(&server)
            .await;

        let error = exchange(&server).login("id", "wrong").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Auth);
        assert!(!error.is_retryable());
        let details = error.api_details().unwrap();
        assert_eq!(details.code, Some(401));
        assert_eq!(details.message, "invalid client credentials");
    }
}
