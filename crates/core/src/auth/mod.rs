//! Authentication: token exchange port and the credential lifecycle

pub mod credential_store;
pub mod ports;

pub use credential_store::CredentialStore;
pub use ports::{AuthExchange, CredentialsProvider};
