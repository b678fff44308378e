//! Conversions from external infrastructure errors into domain errors.

use eka_common::validation::ValidationError;
use eka_domain::{EkaError, TransportErrorKind};
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EkaError);

impl From<InfraError> for EkaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EkaError> for InfraError {
    fn from(value: EkaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoEkaError {
    fn into_eka(self) -> EkaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → EkaError */
/* -------------------------------------------------------------------------- */

impl IntoEkaError for HttpError {
    fn into_eka(self) -> EkaError {
        // Timeout first: a connect timeout reports both flags.
        if self.is_timeout() {
            return EkaError::transport(TransportErrorKind::Timeout, self.to_string());
        }

        if self.is_connect() {
            return EkaError::transport(TransportErrorKind::Connect, self.to_string());
        }

        if self.is_body() || self.is_decode() {
            return EkaError::transport(TransportErrorKind::Body, self.to_string());
        }

        if self.is_builder() {
            return EkaError::Config(format!("invalid HTTP request: {self}"));
        }

        EkaError::transport(TransportErrorKind::Request, self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_eka())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → EkaError */
/* -------------------------------------------------------------------------- */

impl IntoEkaError for JsonError {
    fn into_eka(self) -> EkaError {
        EkaError::Decode(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_eka())
    }
}

/* -------------------------------------------------------------------------- */
/* ValidationError → EkaError */
/* -------------------------------------------------------------------------- */

impl IntoEkaError for ValidationError {
    fn into_eka(self) -> EkaError {
        match self.first() {
            Some(first) => {
                let mut message = first.message.clone();
                let remaining = self.error_count().saturating_sub(1);
                if remaining > 0 {
                    message.push_str(&format!(" (and {remaining} more)"));
                }
                EkaError::validation(first.field.clone(), message)
            }
            None => EkaError::validation("input", "validation failed"),
        }
    }
}

impl From<ValidationError> for InfraError {
    fn from(value: ValidationError) -> Self {
        InfraError(value.into_eka())
    }
}

/// Shorthand used by adapters that return `eka_domain::Result`.
pub(crate) fn into_domain<E>(error: E) -> EkaError
where
    InfraError: From<E>,
{
    InfraError::from(error).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
