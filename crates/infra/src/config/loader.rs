//! Configuration loader
//!
//! Produces a [`ClientConfigBuilder`] pre-populated from environment
//! variables or a config file. Explicit builder calls made afterwards win,
//! which gives the precedence explicit option > environment > default.
//!
//! ## Environment Variables
//! - `EKA_ENVIRONMENT`: `production` or `development`
//! - `EKA_BASE_URL`: overrides the environment's base URL
//! - `EKA_CLIENT_ID` / `EKA_CLIENT_SECRET`: client credentials
//! - `EKA_AUTH_TOKEN` (alias `EKA_API_KEY`): static bearer token
//! - `EKA_TIMEOUT`: overall timeout, bare seconds or a duration like `1m 30s`
//! - `EKA_MAX_RETRIES`: retry budget per HTTP exchange
//! - `EKA_USER_AGENT`: user agent header
//! - `EKA_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`
//!
//! Empty values are treated as unset.
//!
//! ## Files
//! [`load_from_file`] reads TOML or JSON (by extension) with the same keys in
//! lower case without the `EKA_` prefix.

use std::path::Path;
use std::time::Duration;

use eka_common::time::parse_duration;
use eka_domain::constants::{
    ENV_API_KEY, ENV_AUTH_TOKEN, ENV_BASE_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_ENVIRONMENT,
    ENV_LOG_LEVEL, ENV_MAX_RETRIES, ENV_TIMEOUT, ENV_USER_AGENT,
};
use eka_domain::{ClientConfigBuilder, CredentialSource, EkaError, Environment, LogLevel, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Builder pre-populated from the process environment
///
/// # Errors
/// Returns `EkaError::Config` if a variable is set to an unparseable value.
pub fn load_from_env() -> Result<ClientConfigBuilder> {
    let builder = apply_vars(ClientConfigBuilder::new(), |key| std::env::var(key).ok())?;
    debug!("Configuration loaded from environment variables");
    Ok(builder)
}

/// Builder pre-populated from a lookup function instead of the process
/// environment
///
/// # Errors
/// Returns `EkaError::Config` if a variable is set to an unparseable value.
pub fn load_from_vars<F>(lookup: F) -> Result<ClientConfigBuilder>
where
    F: Fn(&str) -> Option<String>,
{
    apply_vars(ClientConfigBuilder::new(), lookup)
}

/// Load a config file, then layer the environment on top
///
/// # Errors
/// Returns `EkaError::Config` if the file cannot be read or parsed, or an
/// environment value is invalid.
pub fn load(path: impl AsRef<Path>) -> Result<ClientConfigBuilder> {
    let builder = load_from_file(path)?;
    apply_vars(builder, |key| std::env::var(key).ok())
}

/// Apply every set variable from `lookup` onto `builder`
///
/// # Errors
/// Returns `EkaError::Config` naming the variable whose value is invalid.
pub fn apply_vars<F>(mut builder: ClientConfigBuilder, lookup: F) -> Result<ClientConfigBuilder>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(value) = var(ENV_ENVIRONMENT) {
        builder = builder.environment(value.parse::<Environment>().map_err(|e| invalid(ENV_ENVIRONMENT, e))?);
    }
    if let Some(value) = var(ENV_BASE_URL) {
        builder = builder.base_url(value);
    }
    if let Some(value) = var(ENV_TIMEOUT) {
        let timeout = parse_duration(&value)
            .map_err(|e| EkaError::Config(format!("invalid {ENV_TIMEOUT}: {e}")))?;
        builder = builder.timeout(timeout);
    }
    if let Some(value) = var(ENV_MAX_RETRIES) {
        let retries = value
            .parse::<u32>()
            .map_err(|e| EkaError::Config(format!("invalid {ENV_MAX_RETRIES}: {e}")))?;
        builder = builder.max_retries(retries);
    }
    if let Some(value) = var(ENV_USER_AGENT) {
        builder = builder.user_agent(value);
    }
    if let Some(value) = var(ENV_LOG_LEVEL) {
        builder = builder.log_level(value.parse::<LogLevel>().map_err(|e| invalid(ENV_LOG_LEVEL, e))?);
    }

    let client_id = var(ENV_CLIENT_ID);
    let client_secret = var(ENV_CLIENT_SECRET);
    let token = var(ENV_AUTH_TOKEN).or_else(|| var(ENV_API_KEY));

    if let Some(source) = credential_source(client_id, client_secret, token) {
        builder = builder.credentials(source);
    }

    Ok(builder)
}

/// Load a builder from a TOML or JSON file
///
/// # Errors
/// Returns `EkaError::Config` if the file is missing, has an unsupported
/// extension, or does not parse.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ClientConfigBuilder> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EkaError::Config(format!("Config file not found: {}", path.display())));
    }

    info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| EkaError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)?.into_builder()
}

/// Parse file contents; format is detected by extension
fn parse_config(contents: &str, path: &Path) -> Result<FileConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EkaError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EkaError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(EkaError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Client id/secret win over a static token when both are present.
fn credential_source(
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Option<String>,
) -> Option<CredentialSource> {
    match (client_id, client_secret, token) {
        (None, None, None) => None,
        (None, None, Some(token)) => Some(CredentialSource::StaticToken(token)),
        (id, secret, _) => Some(CredentialSource::ClientCredentials {
            client_id: id.unwrap_or_default(),
            client_secret: secret.unwrap_or_default(),
        }),
    }
}

fn invalid(key: &str, error: EkaError) -> EkaError {
    match error {
        EkaError::Config(message) => EkaError::Config(format!("invalid {key}: {message}")),
        other => other,
    }
}

/// On-disk configuration; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    environment: Option<String>,
    base_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    auth_token: Option<String>,
    timeout: Option<DurationValue>,
    request_timeout: Option<DurationValue>,
    response_timeout: Option<DurationValue>,
    connect_timeout: Option<DurationValue>,
    max_retries: Option<u32>,
    user_agent: Option<String>,
    log_level: Option<String>,
}

/// Either whole seconds or a duration string such as `"1m 30s"`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    fn resolve(&self, key: &str) -> Result<Duration> {
        match self {
            Self::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            Self::Text(text) => {
                parse_duration(text).map_err(|e| EkaError::Config(format!("invalid {key}: {e}")))
            }
        }
    }
}

impl FileConfig {
    fn into_builder(self) -> Result<ClientConfigBuilder> {
        let mut builder = ClientConfigBuilder::new();

        if let Some(environment) = self.environment {
            builder = builder.environment(environment.parse().map_err(|e| invalid("environment", e))?);
        }
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout.resolve("timeout")?);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.request_timeout(timeout.resolve("request_timeout")?);
        }
        if let Some(timeout) = self.response_timeout {
            builder = builder.response_timeout(timeout.resolve("response_timeout")?);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout.resolve("connect_timeout")?);
        }
        if let Some(retries) = self.max_retries {
            builder = builder.max_retries(retries);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(level) = self.log_level {
            builder = builder.log_level(level.parse().map_err(|e| invalid("log_level", e))?);
        }
        if let Some(source) = credential_source(self.client_id, self.client_secret, self.auth_token) {
            builder = builder.credentials(source);
        }

        Ok(builder)
    }
}
