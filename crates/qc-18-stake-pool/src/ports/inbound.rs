//! # Driving Ports (API - Inbound)
//!
//! The public API of the stake pool. A CLI, RPC handler, or test harness
//! drives the pool through this trait.

use crate::domain::entities::SettlementReceipt;
use crate::domain::value_objects::{Address, U256};
use crate::errors::LotteryError;
use async_trait::async_trait;

/// Primary API of the stake pool.
///
/// ## Usage
///
/// ```ignore
/// api.enter(player, parse_ether("0.02")?).await?;
/// let players = api.get_players(player).await;
/// let receipt = api.select_winner(owner).await?;
/// ```
#[async_trait]
pub trait LotteryApi: Send + Sync {
    /// Enter the pool with `stake` wei attached.
    ///
    /// # Errors
    ///
    /// `InsufficientStake` when `stake` is below the floor.
    async fn enter(&self, caller: Address, stake: U256) -> Result<(), LotteryError>;

    /// Current entrants in insertion order. Any caller may read.
    async fn get_players(&self, caller: Address) -> Vec<Address>;

    /// Pick a winner, pay out the whole pot, and reset the pool.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `EmptyPool`, or `SettlementTransferFailed`. On any
    /// error the pool is exactly as it was before the call.
    ///
    /// # Cancel safety
    ///
    /// Not cancel safe once the payout has started. The pool lock is held
    /// across `PayoutLedger::transfer`, and dropping this future after the
    /// ledger has credited the winner leaves the pool unsettled. A
    /// `PayoutLedger` must therefore either finish a transfer it has begun
    /// even if the caller's future is dropped, or apply it atomically at
    /// completion.
    async fn select_winner(&self, caller: Address) -> Result<SettlementReceipt, LotteryError>;
}
