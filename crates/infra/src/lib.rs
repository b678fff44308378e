//! # Eka Infrastructure
//!
//! Adapters that put the Eka ABDM client on the network.
//!
//! This crate contains:
//! - The reqwest transport and its interceptor chain (logging, metrics, auth
//!   check, retry)
//! - The HTTP token exchange backing the credential store
//! - Service facades for registration, login, profile and utility calls
//! - [`EkaClient`], which wires all of the above from a [`ClientConfig`]
//! - Environment and file configuration loading
//! - Tracing subscriber setup and metrics recorders
//!
//! ## Architecture
//! - Implements traits defined in `eka-core`
//! - Depends on `eka-common`, `eka-domain` and `eka-core`
//! - Contains all "impure" code (network I/O, process environment, files)
//!
//! [`ClientConfig`]: eka_domain::ClientConfig

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod services;

// Re-export commonly used items
pub use api::{ApiClient, HttpAuthExchange};
pub use client::{EkaClient, EkaClientBuilder};
pub use errors::InfraError;
pub use http::{
    ApiRequest, HttpRequest, HttpResponse, HttpSender, HttpTransport, Interceptor, Next,
    ReqwestSender,
};
pub use observability::{init_tracing, InMemoryMetrics, MetricsFacadeRecorder, MetricsRecorder};
pub use services::{LoginService, ProfileService, RegistrationService, UtilityService};
