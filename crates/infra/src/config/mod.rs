//! Configuration loading
//!
//! Builds a [`eka_domain::ClientConfigBuilder`] from environment variables
//! or a config file. The resulting snapshot is immutable once built.

pub mod loader;

pub use loader::{apply_vars, load, load_from_env, load_from_file, load_from_vars};
