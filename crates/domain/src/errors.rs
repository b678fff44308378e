//! Error types used throughout the client
//!
//! Every fallible operation in the workspace returns [`EkaError`]. Callers
//! pattern-match on [`EkaError::kind`] rather than on the variant directly,
//! because facade calls wrap the underlying failure in
//! [`EkaError::Operation`] to record which call failed.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of an [`EkaError`], stable across wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection, DNS, TLS or timeout failure. Never carries a status code.
    Transport,
    /// The API answered with a status >= 400.
    Api,
    /// Login or refresh was rejected by the API.
    Auth,
    /// Missing or invalid client configuration.
    Config,
    /// Malformed input caught before any network call.
    Validation,
    /// A response body could not be decoded.
    Decode,
    /// The operation was cancelled by the caller.
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Api => "api",
            Self::Auth => "auth",
            Self::Config => "config",
            Self::Validation => "validation",
            Self::Decode => "decode",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Network-level failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Connection could not be established (refused, DNS, TLS handshake).
    /// The request never reached the server.
    Connect,
    /// A connect, request or response timeout elapsed.
    Timeout,
    /// The request failed after it may have been sent.
    Request,
    /// The response body could not be read.
    Body,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Body => "body",
        };
        f.write_str(name)
    }
}

/// Upstream error detail nested in the API error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceError {
    pub code: String,
    pub message: String,
}

/// Error envelope returned by the API for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: i64,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_error: Option<SourceError>,
}

/// Structured detail of a rejected HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetails {
    /// HTTP status code.
    pub status: u16,
    /// `code` from the error envelope, when the body parsed as one.
    pub code: Option<i64>,
    /// `error` from the envelope, or the raw body text otherwise.
    pub message: String,
    pub source_error: Option<SourceError>,
    /// Raw response body.
    pub body: String,
}

impl ApiErrorDetails {
    /// Build details from a status and raw body, parsing the envelope when
    /// possible and falling back to the raw text.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).into_owned();
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                status,
                code: Some(envelope.code),
                message: envelope.error,
                source_error: envelope.source_error,
                body: text,
            },
            Err(_) => Self { status, code: None, message: text.clone(), source_error: None, body: text },
        }
    }

    /// 5xx and 429 are eligible for retry.
    pub fn is_retryable(&self) -> bool {
        self.status == 429 || (500..600).contains(&self.status)
    }
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "Error {code}: {}", self.message)?,
            None => write!(f, "HTTP {}: {}", self.status, self.message)?,
        }
        if let Some(source) = &self.source_error {
            write!(f, " (Source: {} - {})", source.code, source.message)?;
        }
        Ok(())
    }
}

/// Main error type for the Eka client
#[derive(Error, Debug)]
pub enum EkaError {
    #[error("Transport error ({kind}): {message}")]
    Transport { kind: TransportErrorKind, message: String },

    #[error("API error: {0}")]
    Api(Box<ApiErrorDetails>),

    #[error("Authentication error: {0}")]
    Auth(Box<ApiErrorDetails>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<EkaError>,
    },
}

impl EkaError {
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Transport { kind, message: message.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    pub fn api(details: ApiErrorDetails) -> Self {
        Self::Api(Box::new(details))
    }

    /// Wrap this error with the name of the operation that produced it.
    #[must_use]
    pub fn context(self, operation: &'static str) -> Self {
        Self::Operation { operation, source: Box::new(self) }
    }

    /// The innermost error, looking through operation context.
    pub fn root(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classification of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Config(_) => ErrorKind::Config,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Cancelled | Self::Operation { .. } => ErrorKind::Cancelled,
        }
    }

    /// Status and envelope detail for API and auth errors.
    pub fn api_details(&self) -> Option<&ApiErrorDetails> {
        match self.root() {
            Self::Api(details) | Self::Auth(details) => Some(details),
            _ => None,
        }
    }

    /// HTTP status of API and auth errors. Transport errors have none.
    pub fn status(&self) -> Option<u16> {
        self.api_details().map(|details| details.status)
    }

    /// The transport failure category, if this is a transport error.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self.root() {
            Self::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether a retry may succeed: transport failures, 5xx and 429.
    /// Auth rejections and other 4xx answers are final.
    pub fn is_retryable(&self) -> bool {
        match self.root() {
            Self::Transport { .. } => true,
            Self::Api(details) => details.is_retryable(),
            _ => false,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, EkaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_body_is_parsed() {
        let body = br#"{"code":401,"error":"invalid client credentials"}"#;
        let details = ApiErrorDetails::from_response(401, body);

        assert_eq!(details.code, Some(401));
        assert_eq!(details.message, "invalid client credentials");
        assert!(details.source_error.is_none());
        assert_eq!(details.to_string(), "Error 401: invalid client credentials");
    }

    #[test]
    fn envelope_with_source_error_is_displayed() {
        let body = br#"{"code":400,"error":"bad otp","source_error":{"code":"ABDM-1204","message":"OTP expired"}}"#;
        let details = ApiErrorDetails::from_response(400, body);

        assert_eq!(
            details.source_error,
            Some(SourceError { code: "ABDM-1204".into(), message: "OTP expired".into() })
        );
        assert_eq!(details.to_string(), "Error 400: bad otp (Source: ABDM-1204 - OTP expired)");
    }

    #[test]
    fn non_envelope_body_falls_back_to_raw_text() {
        let details = ApiErrorDetails::from_response(502, b"<html>Bad Gateway</html>");

        assert_eq!(details.code, None);
        assert_eq!(details.message, "<html>Bad Gateway</html>");
        assert_eq!(details.to_string(), "HTTP 502: <html>Bad Gateway</html>");
    }

    #[test]
    fn retryable_classification() {
        let api = |status| EkaError::api(ApiErrorDetails::from_response(status, b""));

        assert!(api(429).is_retryable());
        assert!(api(500).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!api(404).is_retryable());
        assert!(EkaError::transport(TransportErrorKind::Connect, "refused").is_retryable());

        let auth = EkaError::Auth(Box::new(ApiErrorDetails::from_response(500, b"")));
        assert!(!auth.is_retryable(), "auth rejections are never retried");
        assert!(!EkaError::Config("missing".into()).is_retryable());
    }

    #[test]
    fn kind_looks_through_operation_context() {
        let err = EkaError::api(ApiErrorDetails::from_response(404, b"not found"))
            .context("get_profile")
            .context("outer");

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().starts_with("outer failed: get_profile failed"));
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = EkaError::transport(TransportErrorKind::Timeout, "elapsed");
        assert_eq!(err.status(), None);
        assert_eq!(err.transport_kind(), Some(TransportErrorKind::Timeout));
    }
}
