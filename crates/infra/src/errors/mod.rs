//! Error conversions at the infrastructure boundary.

mod conversions;

pub(crate) use conversions::into_domain;
pub use conversions::InfraError;
