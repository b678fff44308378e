//! # Eka Core
//!
//! Pure credential lifecycle logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for token exchange and credential lookup
//! - The credential store state machine (cache, refresh, login)
//!
//! ## Architecture Principles
//! - Only depends on `eka-common` and `eka-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;

pub use auth::{AuthExchange, CredentialStore, CredentialsProvider};
