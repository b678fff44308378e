//! Tracing subscriber setup for applications using the client
//!
//! The library itself only emits `tracing` events. Applications that have no
//! subscriber of their own can call [`init_tracing`] once at startup.

use eka_domain::{EkaError, LogLevel, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Install a global `fmt` subscriber at `level` in compact format.
///
/// `RUST_LOG`, when set, replaces the level entirely.
///
/// # Errors
/// Returns `EkaError::Config` if a global subscriber is already installed.
pub fn init_tracing(level: LogLevel) -> Result<()> {
    init_tracing_with(level, LogFormat::Compact)
}

/// [`init_tracing`] with an explicit output format.
///
/// # Errors
/// Returns `EkaError::Config` if a global subscriber is already installed.
pub fn init_tracing_with(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = env_filter(level);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Compact => registry.with(fmt::layer().compact().with_target(true)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_current_span(true)).try_init(),
    };

    installed.map_err(|err| EkaError::Config(format!("tracing subscriber not installed: {err}")))
}

/// `RUST_LOG` if set and valid, otherwise `level` with HTTP internals quieted.
pub(crate) fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported() {
        // Whichever test installs first wins; the second call must fail cleanly.
        let _ = init_tracing(LogLevel::Debug);
        let error = init_tracing_with(LogLevel::Info, LogFormat::Json).unwrap_err();
        assert!(error.to_string().contains("tracing subscriber not installed"));
    }

    #[test]
    fn filter_uses_requested_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = env_filter(LogLevel::Warn).to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains("reqwest=warn"));
    }
}
