//! Tracing subscriber setup.
//!
//! Console output only: pretty for development, JSON for containers.

use crate::config::ServiceConfig;
use crate::errors::TelemetryError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter from `config.log_level`.
///
/// The environment is not consulted here; `ServiceConfig::from_env` has
/// already resolved `QC_LOG_LEVEL` ahead of `RUST_LOG`.
///
/// # Errors
///
/// Invalid filter directive.
pub fn build_filter(config: &ServiceConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Init(e.to_string()))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Invalid filter directive, or a subscriber is already installed.
pub fn init_tracing(config: &ServiceConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::info!(
        owner = %config.pool.owner,
        json = config.json_logs,
        "Stake pool tracing initialized"
    );
    Ok(())
}
