//! Token material and the wire shapes of the token exchange

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_SAFETY_MARGIN_SECS;

/// Body of the client login call.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Body of the token refresh call.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshRequest { .. }")
    }
}

/// Token exchange response. Lifetimes are in seconds.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("expires_in", &self.expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish_non_exhaustive()
    }
}

/// How a credential came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialOrigin {
    Login,
    Refresh,
    Static,
    External,
}

impl fmt::Display for CredentialOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Refresh => "refresh",
            Self::Static => "static",
            Self::External => "external",
        };
        f.write_str(name)
    }
}

/// Bearer token material held by a credential store.
///
/// Expiry timestamps are absolute. `None` means the token never expires from
/// the client's point of view (static or externally installed tokens).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_expires_at: Option<DateTime<Utc>>,
    pub source: CredentialOrigin,
}

impl Credentials {
    /// Anchor server-declared lifetimes at `now`.
    pub fn from_token_response(
        response: TokenResponse,
        now: DateTime<Utc>,
        source: CredentialOrigin,
    ) -> Self {
        let refresh_token = Some(response.refresh_token).filter(|token| !token.is_empty());
        let refresh_expires_at =
            refresh_token.as_ref().map(|_| expiry_after(now, response.refresh_expires_in));
        Self {
            access_token: response.access_token,
            refresh_token,
            expires_at: Some(expiry_after(now, response.expires_in)),
            refresh_expires_at,
            source,
        }
    }

    /// A token with no expiry and no refresh capability.
    pub fn non_expiring(access_token: impl Into<String>, source: CredentialOrigin) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            refresh_expires_at: None,
            source,
        }
    }

    /// `now < expires_at - 5 min`.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now
                .checked_add_signed(Duration::seconds(TOKEN_SAFETY_MARGIN_SECS))
                .is_some_and(|limit| limit < expires_at),
            None => true,
        }
    }

    /// Non-empty refresh token that has not expired yet.
    pub fn is_refreshable(&self, now: DateTime<Utc>) -> bool {
        let has_token = self.refresh_token.as_deref().is_some_and(|token| !token.is_empty());
        has_token && self.refresh_expires_at.is_some_and(|expires_at| now < expires_at)
    }
}

/// `now + seconds`, saturating at the ends of the representable range.
fn expiry_after(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    Duration::try_seconds(seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(if seconds < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC })
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .field("source", &self.source)
            .finish()
    }
}
