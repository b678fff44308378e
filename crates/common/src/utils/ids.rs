//! Identifier generation

use rand::{Rng, RngCore};

/// Number of random bytes in a transaction id.
pub const TRANSACTION_ID_BYTES: usize = 16;

/// Generate a fresh transaction id: 16 random bytes, hex-encoded (32 chars).
///
/// # Examples
///
/// ```
/// use eka_common::utils::generate_transaction_id;
///
/// let id = generate_transaction_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_transaction_id() -> String {
    generate_transaction_id_with(&mut rand::thread_rng())
}

/// Generate a transaction id from a caller-supplied randomness source.
pub fn generate_transaction_id_with<R: RngCore>(rng: &mut R) -> String {
    let bytes: [u8; TRANSACTION_ID_BYTES] = rng.gen();
    hex::encode(bytes)
}
