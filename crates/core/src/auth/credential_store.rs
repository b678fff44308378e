//! Credential store - token lifecycle state machine
//!
//! Produces a currently valid credential for every outgoing call. The cached
//! value is read without blocking on the fast path; refresh and login run
//! inside an async exclusive section so concurrent callers share a single
//! network round trip.
//!
//! Nothing is written to the cache until an exchange has succeeded. A failed
//! or cancelled exchange therefore leaves the store exactly as it was, and the
//! next caller simply tries again.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eka_common::time::{Clock, SystemClock};
use eka_domain::constants::{ENV_CLIENT_ID, ENV_CLIENT_SECRET};
use eka_domain::{CredentialOrigin, CredentialSource, Credentials, EkaError, Result};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::ports::{AuthExchange, CredentialsProvider};

/// Caches credentials and serializes login/refresh exchanges
pub struct CredentialStore {
    source: CredentialSource,
    exchange: Arc<dyn AuthExchange>,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<Credentials>>,
    exclusive: Mutex<()>,
}

impl CredentialStore {
    /// Create a store for the given credential source
    ///
    /// A static token source starts out holding its token as a non-expiring
    /// credential and never calls `exchange`.
    pub fn new(source: CredentialSource, exchange: Arc<dyn AuthExchange>) -> Self {
        let cached = match &source {
            CredentialSource::StaticToken(token) => {
                Some(Credentials::non_expiring(token.clone(), CredentialOrigin::Static))
            }
            _ => None,
        };

        Self {
            source,
            exchange,
            clock: Arc::new(SystemClock),
            cached: RwLock::new(cached),
            exclusive: Mutex::new(()),
        }
    }

    /// Replace the clock used for expiry comparisons
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    /// Snapshot of the cached credential, without authenticating
    pub fn cached(&self) -> Option<Credentials> {
        self.cached.read().clone()
    }

    /// Whether a usable credential is cached right now
    pub fn is_authenticated(&self) -> bool {
        let now = self.clock.utc_now();
        self.cached.read().as_ref().is_some_and(|credentials| credentials.is_usable(now))
    }

    /// Atomically replace the cached credential
    pub fn install(&self, credentials: Credentials) {
        info!(origin = %credentials.source, "Installing credentials");
        *self.cached.write() = Some(credentials);
    }

    /// Drop the cached credential if it still carries `access_token`
    ///
    /// Returns whether anything was removed. Static-token stores keep their
    /// token, since there is nothing to re-authenticate with.
    pub fn invalidate(&self, access_token: &str) -> bool {
        if matches!(self.source, CredentialSource::StaticToken(_)) {
            return false;
        }

        let mut cached = self.cached.write();
        let matches = cached.as_ref().is_some_and(|current| current.access_token == access_token);
        if matches {
            *cached = None;
            info!("Cached credentials invalidated");
        }
        matches
    }

    /// Produce a usable credential, refreshing or logging in when needed
    ///
    /// # Errors
    ///
    /// - `EkaError::Config` when a login is needed but no client id/secret is
    ///   configured
    /// - whatever the login exchange returned when it fails
    #[instrument(skip_all, fields(context = %context))]
    pub async fn retrieve(&self, context: &str) -> Result<Credentials> {
        if let Some(credentials) = self.usable_cached(self.clock.utc_now()) {
            debug!(origin = %credentials.source, "Using cached credentials");
            return Ok(credentials);
        }

        if let CredentialSource::StaticToken(token) = &self.source {
            return Ok(Credentials::non_expiring(token.clone(), CredentialOrigin::Static));
        }

        let _guard = self.exclusive.lock().await;

        // Another caller may have finished an exchange while we waited.
        let now = self.clock.utc_now();
        let current = self.cached.read().clone();
        if let Some(credentials) = current.as_ref().filter(|c| c.is_usable(now)) {
            debug!("Credentials refreshed by a concurrent caller");
            return Ok(credentials.clone());
        }

        if let Some(stale) = current.filter(|c| c.is_refreshable(now)) {
            match self.refresh(&stale).await {
                Ok(credentials) => return Ok(credentials),
                Err(err) => warn!(error = %err, "Token refresh failed, falling back to login"),
            }
        }

        self.login().await
    }

    fn usable_cached(&self, now: DateTime<Utc>) -> Option<Credentials> {
        self.cached.read().as_ref().filter(|credentials| credentials.is_usable(now)).cloned()
    }

    async fn refresh(&self, stale: &Credentials) -> Result<Credentials> {
        let refresh_token = stale.refresh_token.as_deref().unwrap_or_default();
        let response = self.exchange.refresh(&stale.access_token, refresh_token).await?;
        Ok(self.store(Credentials::from_token_response(
            response,
            self.clock.utc_now(),
            CredentialOrigin::Refresh,
        )))
    }

    async fn login(&self) -> Result<Credentials> {
        let (client_id, client_secret) = self.client_credentials()?;
        let response = self.exchange.login(client_id, client_secret).await?;
        Ok(self.store(Credentials::from_token_response(
            response,
            self.clock.utc_now(),
            CredentialOrigin::Login,
        )))
    }

    fn store(&self, credentials: Credentials) -> Credentials {
        info!(
            origin = %credentials.source,
            expires_at = ?credentials.expires_at,
            "Authenticated"
        );
        *self.cached.write() = Some(credentials.clone());
        credentials
    }

    fn client_credentials(&self) -> Result<(&str, &str)> {
        match &self.source {
            CredentialSource::ClientCredentials { client_id, client_secret }
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Ok((client_id.as_str(), client_secret.as_str()))
            }
            _ => Err(EkaError::Config(format!(
                "client id and secret are required to authenticate; set {ENV_CLIENT_ID} and \
                 {ENV_CLIENT_SECRET} or configure a static token"
            ))),
        }
    }
}

#[async_trait]
impl CredentialsProvider for CredentialStore {
    async fn retrieve(&self, context: &str) -> Result<Credentials> {
        CredentialStore::retrieve(self, context).await
    }

    fn invalidate(&self, access_token: &str) {
        CredentialStore::invalidate(self, access_token);
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("source", &self.source)
            .field("cached", &*self.cached.read())
            .finish_non_exhaustive()
    }
}
