//! Shared test helpers for `eka-core` integration tests.
//!
//! Lightweight fakes for the auth ports so tests can focus on the store's
//! behaviour instead of wiring.

pub mod exchange;
