//! Port interfaces for authentication
//!
//! These traits define the boundaries between the credential lifecycle logic
//! and the infrastructure that actually talks to the token endpoints.

use async_trait::async_trait;
use eka_domain::{Credentials, Result, TokenResponse};

/// Wire operations that mint tokens
#[async_trait]
pub trait AuthExchange: Send + Sync {
    /// Exchange a client id/secret pair for a fresh token set.
    ///
    /// A rejection by the remote API must surface as `EkaError::Auth`, never
    /// as a transport error.
    async fn login(&self, client_id: &str, client_secret: &str) -> Result<TokenResponse>;

    /// Exchange a still-valid refresh token for a new token set.
    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<TokenResponse>;
}

/// Source of a currently valid bearer credential for outgoing calls
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Return a usable credential, authenticating first if needed.
    ///
    /// `context` names the caller for diagnostics only.
    async fn retrieve(&self, context: &str) -> Result<Credentials>;

    /// Forget the cached credential if it still carries `access_token`.
    fn invalidate(&self, _access_token: &str) {}
}
