//! # Eka Domain
//!
//! Business domain types for the Eka ABDM/ABHA client.
//!
//! This crate contains:
//! - The error taxonomy and Result definition
//! - The immutable client configuration and its builder
//! - Credentials and token-exchange shapes
//! - Request/response payloads for registration, login and profile flows
//! - The endpoint path table and other constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure data and data-level invariants, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
