//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the stake pool depends on. Adapters implement these traits to
//! provide:
//! - Payout transfer of the settled pot
//! - Entropy for winner selection
//!
//! Dependencies point INWARD: adapters implement these traits, the service
//! only sees the traits.

use crate::domain::value_objects::{Address, U256};
use crate::errors::LedgerError;
use async_trait::async_trait;

// =============================================================================
// PAYOUT LEDGER
// =============================================================================

/// Moves the settled pot to the winner.
///
/// ## Contract
///
/// `transfer` must be all-or-nothing: on `Err` the recipient's balance is
/// unchanged. The service relies on this to discard the whole settlement.
#[async_trait]
pub trait PayoutLedger: Send + Sync {
    /// Credit `amount` wei to `to`.
    ///
    /// # Errors
    ///
    /// Any `LedgerError`; the settlement is then rolled back.
    async fn transfer(&self, to: Address, amount: U256) -> Result<(), LedgerError>;

    /// Current balance of `account`.
    async fn balance_of(&self, account: Address) -> Result<U256, LedgerError>;
}

// =============================================================================
// RANDOMNESS SOURCE
// =============================================================================

/// Supplies 32 bytes of entropy, drawn once per settlement.
///
/// The entropy is mixed with the caller and pool composition before
/// reducing to an index (see `domain::services`). A fixed source makes
/// winner selection fully deterministic.
pub trait RandomnessSource: Send + Sync {
    /// Next entropy value.
    fn entropy(&self) -> [u8; 32];
}
