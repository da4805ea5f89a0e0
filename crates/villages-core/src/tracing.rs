//! Tracing setup for villages-events
//!
//! Rendered events are the only thing written to stdout, so every log line
//! goes to stderr.
//!
//! # Usage
//!
//! ```ignore
//! use villages_core::tracing::{init_tracing, TracingConfig};
//!
//! let config = if debug { TracingConfig::cli_debug() } else { TracingConfig::default() };
//! init_tracing(config).expect("failed to initialize tracing");
//! ```

use std::io;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// The level used when RUST_LOG is unset or unparsable
    pub default_level: Level,
    /// Whether to include file/line information in logs
    pub include_location: bool,
    /// Whether to include target (module path) in logs
    pub include_target: bool,
}

impl Default for TracingConfig {
    /// Warnings and errors only, so a normal run prints nothing but output.
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_location: false,
            include_target: false,
        }
    }
}

impl TracingConfig {
    /// Create a config for `--debug` runs
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
        }
    }

    fn build_filter(&self) -> EnvFilter {
        if self.default_level > Level::WARN {
            // Debug was asked for explicitly; RUST_LOG must not silence it.
            return EnvFilter::new(self.default_level.to_string());
        }
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_level.to_string()))
    }
}

/// Initialize tracing with the given configuration.
///
/// Call once, before the pipeline runs. Records are compact single lines
/// on stderr.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let subscriber = tracing_subscriber::registry().with(config.build_filter()).with(
        fmt::layer()
            .compact()
            .without_time()
            .with_writer(io::stderr)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(config.include_target),
    );
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
