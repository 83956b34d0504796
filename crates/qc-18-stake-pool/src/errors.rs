//! # Error Types
//!
//! All error types for the stake pool subsystem.

use crate::domain::value_objects::{Address, U256};
use thiserror::Error;

// =============================================================================
// LOTTERY ERRORS
// =============================================================================

/// Errors returned by pool operations.
///
/// Every variant leaves the pool exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LotteryError {
    /// Attached stake is below the configured floor.
    #[error("insufficient stake: {stake} wei < minimum {minimum} wei")]
    InsufficientStake { stake: U256, minimum: U256 },

    /// Caller is not the pool owner.
    #[error("unauthorized: {caller} is not the pool owner")]
    Unauthorized { caller: Address },

    /// Settlement requested with no entrants.
    #[error("cannot settle an empty pool")]
    EmptyPool,

    /// Payout to the winner failed; the settlement was discarded.
    #[error("settlement transfer of {amount} wei to {winner} failed: {source}")]
    SettlementTransferFailed {
        winner: Address,
        amount: U256,
        #[source]
        source: LedgerError,
    },

    /// Adding the stake would overflow the pot.
    #[error("pot overflow: {pot} + {stake} exceeds 256 bits")]
    PotOverflow { pot: U256, stake: U256 },

    /// A staged settlement no longer matches the pool it was drawn from.
    #[error("stale settlement: staged for round {staged_round} with {staged_entrants} entries, pool is at round {round} with {entrants}")]
    StaleSettlement {
        staged_round: u64,
        staged_entrants: usize,
        round: u64,
        entrants: usize,
    },

    /// A persisted snapshot violates a pool invariant.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

impl LotteryError {
    /// Returns true if the caller may retry after changing its inputs.
    ///
    /// Snapshot corruption is the only failure that retrying cannot fix.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CorruptSnapshot(_))
    }
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the payout ledger (outbound port).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The recipient refused the transfer.
    #[error("transfer to {to} rejected by recipient")]
    TransferRejected { to: Address },

    /// Crediting the recipient would overflow its balance.
    #[error("balance overflow crediting {to}")]
    BalanceOverflow { to: Address },

    /// Debit exceeds the account balance.
    #[error("insufficient funds in {from}: required {required}, available {available}")]
    InsufficientFunds {
        from: Address,
        required: U256,
        available: U256,
    },

    /// Ledger backend unavailable.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// UNIT ERRORS
// =============================================================================

/// Errors parsing ether amounts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// Nothing to parse.
    #[error("empty amount")]
    Empty,

    /// Non-digit character in the amount.
    #[error("invalid digit in amount: {0:?}")]
    InvalidDigit(String),

    /// More fractional digits than wei can represent.
    #[error("too many decimals: {digits} > {max}")]
    TooManyDecimals { digits: usize, max: usize },

    /// Amount does not fit in 256 bits.
    #[error("amount overflows 256 bits: {0}")]
    Overflow(String),
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors loading or validating configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `QC_LOTTERY_OWNER` not set.
    #[error("missing owner address (set QC_LOTTERY_OWNER)")]
    MissingOwner,

    /// Owner is not a 20-byte hex address.
    #[error("invalid owner address: {0:?}")]
    InvalidOwner(String),

    /// Owner is the zero address.
    #[error("owner must not be the zero address")]
    ZeroOwner,

    /// Minimum stake could not be parsed.
    #[error("invalid minimum stake: {0}")]
    InvalidMinimumStake(#[from] UnitError),

    /// Minimum stake is zero.
    #[error("minimum stake must be positive")]
    ZeroMinimumStake,
}

// =============================================================================
// TELEMETRY ERRORS
// =============================================================================

/// Errors installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter or subscriber initialization failed.
    #[error("failed to initialize tracing: {0}")]
    Init(String),
}
