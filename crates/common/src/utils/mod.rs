//! Common utility functions
//!
//! - **[`ids`]**: random transaction identifiers

pub mod ids;

pub use self::ids::{generate_transaction_id, generate_transaction_id_with};
