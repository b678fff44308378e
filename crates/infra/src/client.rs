//! Top-level client
//!
//! [`EkaClient`] owns one reqwest connection pool shared by two transports:
//! the caller-facing one with the full interceptor chain, and the one used by
//! the token exchange, which has no auth check. The credential store sits
//! between them.

use std::sync::Arc;

use eka_common::time::{Clock, SystemClock};
use eka_core::{CredentialStore, CredentialsProvider};
use eka_domain::constants::paths;
use eka_domain::{
    ClientConfig, CredentialOrigin, CredentialSource, Credentials, ErrorKind, Result,
};
use tracing::{debug, info, instrument};

use crate::api::{ApiClient, HttpAuthExchange};
use crate::config::load_from_env;
use crate::http::interceptors::{default_chain, exchange_chain};
use crate::http::{ApiRequest, HttpSender, HttpTransport, Interceptor, ReqwestSender};
use crate::observability::{MetricsFacadeRecorder, MetricsRecorder};
use crate::services::{LoginService, ProfileService, RegistrationService, UtilityService};

/// Typed client for the Eka ABDM API
///
/// Cheap to clone; clones share the connection pool and the credential
/// cache.
///
/// # Example
///
/// ```no_run
/// use eka_domain::{AadhaarInitRequest, ClientConfig, RequestHeaders};
/// use eka_infra::EkaClient;
///
/// # async fn example() -> eka_domain::Result<()> {
/// let config = ClientConfig::builder().client_credentials("id", "secret").build()?;
/// let client = EkaClient::new(config)?;
///
/// let headers = RequestHeaders::new().partner_id("clinic-42");
/// let txn = client
///     .registration()
///     .aadhaar_init(&headers, &AadhaarInitRequest::new("123456789012"))
///     .await?;
/// println!("OTP sent, txn {}", txn.txn_id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EkaClient {
    config: Arc<ClientConfig>,
    store: Arc<CredentialStore>,
    api: Arc<ApiClient>,
    registration: RegistrationService,
    login: LoginService,
    profile: ProfileService,
    utility: UtilityService,
}

impl EkaClient {
    /// Build a client with the default interceptors and a reqwest sender
    ///
    /// # Errors
    /// Returns `EkaError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        EkaClientBuilder::new(config).build()
    }

    /// Build a client from `EKA_*` environment variables
    ///
    /// # Errors
    /// Returns `EkaError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::new(load_from_env()?.build()?)
    }

    pub fn builder(config: ClientConfig) -> EkaClientBuilder {
        EkaClientBuilder::new(config)
    }

    pub fn registration(&self) -> &RegistrationService {
        &self.registration
    }

    pub fn abha_login(&self) -> &LoginService {
        &self.login
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn utils(&self) -> &UtilityService {
        &self.utility
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The credential store shared by every facade
    pub fn credentials(&self) -> &CredentialStore {
        &self.store
    }

    /// Authenticate now instead of on the first API call
    ///
    /// Returns the cached credential when it is still usable.
    ///
    /// # Errors
    ///
    /// - `EkaError::Config` when no credentials are configured
    /// - `EkaError::Auth` when the API rejects the client id/secret
    #[instrument(skip(self))]
    pub async fn login(&self) -> Result<Credentials> {
        self.store.retrieve("login").await
    }

    /// Install a bearer token obtained elsewhere
    ///
    /// The token is treated as non-expiring until the API rejects it.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.store.install(Credentials::non_expiring(token, CredentialOrigin::External));
    }

    /// Install a full credential, expiry and refresh token included
    pub fn set_credentials(&self, credentials: Credentials) {
        self.store.install(credentials);
    }

    /// Snapshot of the cached credential, without authenticating
    pub fn cached_credentials(&self) -> Option<Credentials> {
        self.store.cached()
    }

    /// Check that the API is reachable
    ///
    /// # Returns
    ///
    /// `true` on a 2xx answer, `false` on an error status
    ///
    /// # Errors
    ///
    /// Returns the transport error when the API cannot be reached
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<bool> {
        let request = ApiRequest::get(paths::HEALTH).unauthenticated();
        match self.api.transport().execute(request, None).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::Api => {
                debug!(status = ?err.status(), "Health check answered with an error status");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for EkaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EkaClient")
            .field("base_url", &self.config.base_url)
            .field("credentials", &self.config.credentials)
            .finish_non_exhaustive()
    }
}

/// Optional pieces for [`EkaClient`]
pub struct EkaClientBuilder {
    config: ClientConfig,
    interceptors: Vec<Arc<dyn Interceptor>>,
    recorder: Arc<dyn MetricsRecorder>,
    clock: Arc<dyn Clock>,
    sender: Option<Arc<dyn HttpSender>>,
}

impl EkaClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            interceptors: Vec::new(),
            recorder: Arc::new(MetricsFacadeRecorder),
            clock: Arc::new(SystemClock),
            sender: None,
        }
    }

    /// Add an interceptor inside the default chain, closest to the network
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn metrics_recorder(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Clock used for token expiry checks
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the reqwest sender, e.g. with a scripted one in tests
    pub fn sender(mut self, sender: Arc<dyn HttpSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// # Errors
    /// Returns `EkaError::Config` if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn build(self) -> Result<EkaClient> {
        let Self { config, interceptors, recorder, clock, sender } = self;
        config.validate()?;

        let sender: Arc<dyn HttpSender> = match sender {
            Some(sender) => sender,
            None => Arc::new(ReqwestSender::new(&config)?),
        };

        let exchange_transport = HttpTransport::new(&config, sender.clone())
            .with_interceptors(exchange_chain(&config, recorder.clone()));
        let exchange = Arc::new(HttpAuthExchange::new(Arc::new(exchange_transport)));

        let store =
            Arc::new(CredentialStore::new(config.credentials.clone(), exchange).with_clock(clock));
        let provider: Arc<dyn CredentialsProvider> = store.clone();

        let transport = HttpTransport::new(&config, sender)
            .with_interceptors(default_chain(&config, recorder, provider.clone()))
            .with_interceptors(interceptors);
        let api = Arc::new(ApiClient::new(Arc::new(transport), provider));

        info!(
            base_url = %config.base_url,
            authenticated = !matches!(config.credentials, CredentialSource::Unconfigured),
            "Eka client ready"
        );

        Ok(EkaClient {
            registration: RegistrationService::new(api.clone()),
            login: LoginService::new(api.clone()),
            profile: ProfileService::new(api.clone()),
            utility: UtilityService::new(),
            config: Arc::new(config),
            store,
            api,
        })
    }
}

#[cfg(test)]
mod tests {
    use eka_domain::ClientConfig;

    use super::*;

    #[test]
    fn test_clients_share_the_credential_cache() {
        let config = ClientConfig::builder().base_url("http://localhost:1").build().unwrap();
        let client = EkaClient::new(config).unwrap();
        let clone = client.clone();

        client.set_access_token("external");

        let cached = clone.cached_credentials().unwrap();
        assert_eq!(cached.access_token, "external");
        assert_eq!(cached.source, CredentialOrigin::External);
        assert!(clone.credentials().is_authenticated());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:1")
            .client_credentials("id", "super-secret")
            .build()
            .unwrap();
        let client = EkaClient::new(config).unwrap();

        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn test_login_without_credentials_is_a_config_error() {
        let config = ClientConfig::builder().base_url("http://localhost:1").build().unwrap();
        let client = EkaClient::new(config).unwrap();

        let err = client.login().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("EKA_CLIENT_ID"));
    }
}
