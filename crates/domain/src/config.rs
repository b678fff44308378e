//! Client configuration
//!
//! [`ClientConfig`] is an immutable snapshot assembled once by
//! [`ClientConfigBuilder`]. The builder starts from the built-in defaults and
//! every setter overwrites the previous value, so layering "defaults, then
//! environment, then explicit options" is just a sequence of setter calls.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF_DELAY,
    DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RESPONSE_TIMEOUT, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT, DEVELOPMENT_BASE_URL, PRODUCTION_BASE_URL,
};
use crate::errors::{EkaError, Result};

/// Deployment environment selecting the API base URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = EkaError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(EkaError::Config(format!("unknown environment: {other}"))),
        }
    }
}

/// Verbosity for the client's tracing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = EkaError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(EkaError::Config(format!("unknown log level: {other}"))),
        }
    }
}

/// Where the client gets its bearer token from.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum CredentialSource {
    /// No credentials configured. Any authenticated call fails with a
    /// configuration error.
    #[default]
    Unconfigured,
    /// Automated login with a client id/secret pair, refreshed as needed.
    ClientCredentials { client_id: String, client_secret: String },
    /// Externally supplied bearer token. Never refreshed by the client.
    StaticToken(String),
}

impl CredentialSource {
    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::ClientCredentials { client_id: client_id.into(), client_secret: client_secret.into() }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::Unconfigured)
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => f.write_str("Unconfigured"),
            Self::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            Self::StaticToken(_) => f.debug_tuple("StaticToken").field(&"<redacted>").finish(),
        }
    }
}

/// Immutable client configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Base URL every path is appended to. Derived from `environment`
    /// unless set explicitly.
    pub base_url: String,
    /// Overall per-call deadline applied by the HTTP client.
    pub timeout: Duration,
    pub request_timeout: Duration,
    pub response_timeout: Duration,
    pub connect_timeout: Duration,
    /// Additional attempts after the first one for retry-eligible failures.
    pub max_retries: u32,
    pub initial_backoff: Duration,
    /// Ceiling for a single backoff delay.
    pub max_backoff_delay: Duration,
    pub user_agent: String,
    pub log_level: LogLevel,
    pub credentials: CredentialSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: Environment::default().base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff_delay: DEFAULT_MAX_BACKOFF_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::default(),
            credentials: CredentialSource::default(),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Check the snapshot for values the client cannot work with.
    ///
    /// # Errors
    /// Returns `EkaError::Config` for an empty or non-HTTP base URL, a zero
    /// timeout, or an empty user agent.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(EkaError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        for (name, value) in [
            ("timeout", self.timeout),
            ("request_timeout", self.request_timeout),
            ("response_timeout", self.response_timeout),
            ("connect_timeout", self.connect_timeout),
        ] {
            if value.is_zero() {
                return Err(EkaError::Config(format!("{name} must be greater than zero")));
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err(EkaError::Config("user agent must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`]. Last write wins per field.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
    explicit_base_url: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Override the environment's base URL (e.g. a local mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.explicit_base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.config.response_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.config.initial_backoff = delay;
        self
    }

    pub fn max_backoff_delay(mut self, delay: Duration) -> Self {
        self.config.max_backoff_delay = delay;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn credentials(mut self, source: CredentialSource) -> Self {
        self.config.credentials = source;
        self
    }

    pub fn client_credentials(
        self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials(CredentialSource::client_credentials(client_id, client_secret))
    }

    pub fn static_token(self, token: impl Into<String>) -> Self {
        self.credentials(CredentialSource::StaticToken(token.into()))
    }

    /// Finish the snapshot.
    ///
    /// # Errors
    /// Returns `EkaError::Config` if [`ClientConfig::validate`] rejects it.
    pub fn build(self) -> Result<ClientConfig> {
        let mut config = self.config;
        config.base_url = match self.explicit_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => config.environment.base_url().to_string(),
        };
        config.validate()?;
        Ok(config)
    }
}
