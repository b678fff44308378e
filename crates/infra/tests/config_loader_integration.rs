//! Integration tests for configuration loader
//!
//! Tests loading from the real process environment and from files on disk,
//! and the layering of explicit options over both.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use eka_domain::{CredentialSource, Environment, ErrorKind};
use eka_infra::config;
use once_cell::sync::Lazy;
use tempfile::Builder;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ALL_VARS: &[&str] = &[
    "EKA_ENVIRONMENT",
    "EKA_BASE_URL",
    "EKA_CLIENT_ID",
    "EKA_CLIENT_SECRET",
    "EKA_AUTH_TOKEN",
    "EKA_API_KEY",
    "EKA_TIMEOUT",
    "EKA_MAX_RETRIES",
    "EKA_USER_AGENT",
    "EKA_LOG_LEVEL",
];

/// Clears every `EKA_*` variable on creation and again on drop.
struct CleanEnv;

impl CleanEnv {
    fn new() -> Self {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
        Self
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_load_from_env_precedence() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    let _env = CleanEnv::new();

    // Default
    let config = config::load_from_env().unwrap().build().unwrap();
    assert_eq!(config.max_retries, 3);

    // Env beats default
    std::env::set_var("EKA_MAX_RETRIES", "7");
    let config = config::load_from_env().unwrap().build().unwrap();
    assert_eq!(config.max_retries, 7);

    // Explicit option beats env
    let config = config::load_from_env().unwrap().max_retries(0).build().unwrap();
    assert_eq!(config.max_retries, 0);
}

#[test]
fn test_load_from_env_credentials() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    let _env = CleanEnv::new();

    std::env::set_var("EKA_AUTH_TOKEN", "tok");
    let config = config::load_from_env().unwrap().build().unwrap();
    assert!(matches!(config.credentials, CredentialSource::StaticToken(ref t) if t == "tok"));

    std::env::set_var("EKA_CLIENT_ID", "id");
    std::env::set_var("EKA_CLIENT_SECRET", "secret");
    let config = config::load_from_env().unwrap().build().unwrap();
    assert!(matches!(config.credentials, CredentialSource::ClientCredentials { .. }));
}

#[test]
fn test_load_from_env_invalid_value() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    let _env = CleanEnv::new();

    std::env::set_var("EKA_TIMEOUT", "eventually");

    let err = config::load_from_env().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_load_file_then_env_overlay() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    let _env = CleanEnv::new();

    let mut file = Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    writeln!(
        file,
        r#"
environment = "development"
max_retries = 1
user_agent = "from-file/1.0"
timeout = 12
"#
    )
    .expect("Failed to write to temp file");

    std::env::set_var("EKA_USER_AGENT", "from-env/2.0");

    let config = config::load(file.path()).unwrap().build().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.base_url, "https://api-dev.eka.care");
    assert_eq!(config.max_retries, 1);
    assert_eq!(config.timeout, Duration::from_secs(12));
    assert_eq!(config.user_agent, "from-env/2.0");
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "base_url": "http://localhost:8080",
        "client_id": "id",
        "client_secret": "secret",
        "request_timeout": "2s",
        "log_level": "warn"
    }"#;

    let mut file = Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(file.path()).unwrap().build().unwrap();

    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.request_timeout, Duration::from_secs(2));
    assert_eq!(config.log_level, eka_domain::LogLevel::Warn);
    assert!(config.credentials.is_configured());
}

#[test]
fn test_load_config_invalid_json() {
    let mut file = Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    file.write_all(b"{ not json").expect("Failed to write to temp file");

    let err = config::load_from_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("Invalid JSON"));
}
