//! Authenticated access to the Eka API
//!
//! - [`ApiClient`] attaches bearer tokens and operation context to calls
//! - [`HttpAuthExchange`] mints and renews tokens for the credential store

pub mod auth;
pub mod client;

pub use auth::HttpAuthExchange;
pub use client::ApiClient;
