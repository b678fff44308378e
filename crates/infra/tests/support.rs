//! Shared helpers for the infra integration tests.

use std::sync::Arc;
use std::time::Duration;

use eka_domain::ClientConfig;
use eka_infra::{EkaClient, InMemoryMetrics};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/connect-auth/v1/account/login";

/// Token endpoint answer with an hour of access and a day of refresh.
pub fn token_body(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "expires_in": 3600,
        "refresh_expires_in": 86400,
        "refresh_token": format!("refresh-{access_token}"),
    })
}

/// Mount a login endpoint that always hands out `access_token`.
pub async fn mount_login(server: &MockServer, access_token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token)))
        .mount(server)
        .await;
}

/// Config pointed at `server` with fast retries.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .base_url(server.uri())
        .client_credentials("client-id", "client-secret")
        .max_retries(2)
        .initial_backoff(Duration::from_millis(5))
        .max_backoff_delay(Duration::from_millis(50))
        .request_timeout(Duration::from_secs(5))
        .build()
        .expect("test config should be valid")
}

/// Client plus the metrics it records into.
pub struct TestClient {
    pub client: EkaClient,
    pub metrics: Arc<InMemoryMetrics>,
}

pub fn client_for(server: &MockServer) -> TestClient {
    client_with(config_for(server))
}

pub fn client_with(config: ClientConfig) -> TestClient {
    let metrics = Arc::new(InMemoryMetrics::new());
    let client = EkaClient::builder(config)
        .metrics_recorder(metrics.clone())
        .build()
        .expect("client should build");
    TestClient { client, metrics }
}

/// Requests the server received on `route`.
pub async fn hits(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}
