//! tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over
//! the verbosity flags; `FLOWCOV_LOG_JSON=1` switches to JSON lines.

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Filter from `RUST_LOG`, falling back to the verbosity level
pub fn build_filter(verbosity: Verbosity) -> CliResult<EnvFilter> {
    match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .map_err(|e| CliError::config(format!("invalid RUST_LOG: {e}"))),
        _ => EnvFilter::try_new(verbosity.log_directive())
            .map_err(|e| CliError::config(e.to_string())),
    }
}

/// Install the global subscriber
pub fn init_tracing(verbosity: Verbosity, use_color: bool) -> CliResult<()> {
    let filter = build_filter(verbosity)?;
    let result = if env_bool("FLOWCOV_LOG_JSON") {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(use_color)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| CliError::config(format!("failed to install logger: {e}")))
}
