//! Service configuration from environment variables.

use crate::domain::entities::PoolConfig;
use crate::domain::value_objects::{parse_ether, Address, U256};
use crate::errors::ConfigError;
use std::env;

/// Default entry floor, in ether.
pub const DEFAULT_MINIMUM_STAKE: &str = "0.01";

/// Configuration for a stake pool deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Owner and entry floor.
    pub pool: PoolConfig,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl ServiceConfig {
    /// Configuration for `owner` with the default floor and log settings.
    #[must_use]
    pub fn new(owner: Address, minimum_stake: U256) -> Self {
        Self {
            pool: PoolConfig::new(owner, minimum_stake),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_LOTTERY_OWNER`: Owner address, hex (required)
    /// - `QC_LOTTERY_MIN_STAKE`: Entry floor in ether (default: 0.01)
    /// - `QC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `QC_JSON_LOGS`: Enable JSON logs (default: false)
    ///
    /// # Errors
    ///
    /// Missing or malformed owner, unparsable or zero minimum stake.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner_hex = lookup("QC_LOTTERY_OWNER").ok_or(ConfigError::MissingOwner)?;
        let owner =
            Address::from_hex(&owner_hex).ok_or_else(|| ConfigError::InvalidOwner(owner_hex))?;

        let minimum_stake = parse_ether(
            &lookup("QC_LOTTERY_MIN_STAKE").unwrap_or_else(|| DEFAULT_MINIMUM_STAKE.to_string()),
        )?;

        let pool = PoolConfig::new(owner, minimum_stake);
        pool.validate()?;

        Ok(Self {
            pool,
            log_level: lookup("QC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),
            json_logs: lookup("QC_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
