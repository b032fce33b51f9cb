//! Process-wide logging setup
//!
//! The library only emits `tracing` events. Installing a subscriber is the
//! host application's call, made once at startup.

use std::env;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::errors::FormError;

/// Installs a `fmt` subscriber writing to stderr.
///
/// The level comes from `LOG_LEVEL` (`error`, `warn`, `info`, `debug`,
/// `trace`) and defaults to `info`; `RUST_LOG` directives are honored on
/// top of it. Fails if a global subscriber is already installed.
pub fn init_logging() -> Result<(), FormError> {
    let log_level = env::var("LOG_LEVEL")
        .map(|level| match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| FormError::Config(format!("failed to install logging: {e}")))
}
