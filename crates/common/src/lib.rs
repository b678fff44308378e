//! Modular common utilities shared across Eka crates.
//!
//! Nothing in here knows about the Eka API; domain crates build on these
//! pieces.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: validation, date/duration helpers, id generation
//! - `observability`: tracing instrumentation
//! - `runtime`: async infrastructure (retry with cancellation, clocks)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod time;
#[cfg(feature = "foundation")]
pub mod utils;
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use resilience::{
    retry, retry_with_policy, BackoffStrategy, RetryConfig, RetryConfigBuilder, RetryDecision,
    RetryError, RetryExecutor, RetryPolicy, RetryResult,
};
#[cfg(feature = "runtime")]
pub use time::{Clock, MockClock, SystemClock};
#[cfg(feature = "foundation")]
pub use time::{format_date, parse_date, parse_duration};
#[cfg(feature = "foundation")]
pub use utils::generate_transaction_id;
#[cfg(feature = "foundation")]
pub use validation::{
    validate_aadhaar_number, validate_abha_address, validate_mobile_number, FieldError,
    ValidationError, ValidationResult,
};
