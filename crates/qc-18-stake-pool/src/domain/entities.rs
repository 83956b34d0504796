//! # Domain Entities
//!
//! The stake pool state machine and the records it produces.
//!
//! ```text
//! [OPEN] ──enter──→ [OPEN]
//!    │
//!    └──stage_settlement──→ (Settlement) ──commit──→ [OPEN, empty, round+1]
//!                                 │
//!                                 └── dropped ──→ [OPEN, unchanged]
//! ```
//!
//! Staging borrows the pool immutably, so a settlement whose payout fails
//! is simply dropped and leaves nothing to undo.

use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::services::{derive_seed, select_index};
use crate::domain::value_objects::{Address, U256};
use crate::errors::{ConfigError, LotteryError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Fixed parameters of a pool, set once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// The only account allowed to trigger settlement.
    pub owner: Address,
    /// Entry floor in wei (inclusive).
    pub minimum_stake: U256,
}

impl PoolConfig {
    /// Create a pool configuration.
    #[must_use]
    pub fn new(owner: Address, minimum_stake: U256) -> Self {
        Self {
            owner,
            minimum_stake,
        }
    }

    /// Check the owner is set and the floor is positive.
    ///
    /// # Errors
    ///
    /// `ZeroOwner` or `ZeroMinimumStake`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        if self.minimum_stake.is_zero() {
            return Err(ConfigError::ZeroMinimumStake);
        }
        Ok(())
    }
}

// =============================================================================
// ENTRY
// =============================================================================

/// One accepted entry. An account entering twice yields two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entrant account.
    pub player: Address,
    /// Stake attached to this entry, in wei.
    pub stake: U256,
}

// =============================================================================
// SETTLEMENT
// =============================================================================

/// A staged settlement: the winner and payout computed from the pool,
/// not yet applied.
///
/// Only `StakePool::stage_settlement` creates one; apply it with
/// `StakePool::commit_settlement` once the payout has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a staged settlement does nothing until committed"]
pub struct Settlement {
    winner: Address,
    winner_index: usize,
    amount: U256,
    entrants: usize,
    round: u64,
}

impl Settlement {
    /// Winning account.
    #[must_use]
    pub fn winner(&self) -> Address {
        self.winner
    }

    /// Position of the winning entry in the pool.
    #[must_use]
    pub fn winner_index(&self) -> usize {
        self.winner_index
    }

    /// Full pot to be paid out.
    #[must_use]
    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Number of entries the winner was drawn from.
    #[must_use]
    pub fn entrants(&self) -> usize {
        self.entrants
    }

    /// Round this settlement closes.
    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }
}

/// Outcome of a committed settlement, returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Correlation ID for logs.
    pub settlement_id: Uuid,
    /// Winning account.
    pub winner: Address,
    /// Amount paid to the winner, in wei.
    pub amount: U256,
    /// Number of entries in the settled round.
    pub entrants: usize,
    /// The round that was closed.
    pub round: u64,
}

impl SettlementReceipt {
    /// Build a receipt for a committed settlement.
    pub fn new(settlement_id: Uuid, settlement: &Settlement) -> Self {
        Self {
            settlement_id,
            winner: settlement.winner,
            amount: settlement.amount,
            entrants: settlement.entrants,
            round: settlement.round,
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Serializable copy of the full pool state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Pool owner.
    pub owner: Address,
    /// Entry floor in wei.
    pub minimum_stake: U256,
    /// Entries in insertion order.
    pub entries: Vec<Entry>,
    /// Aggregate balance in wei.
    pub balance: U256,
    /// Settlements committed so far.
    pub round: u64,
}

// =============================================================================
// STAKE POOL
// =============================================================================

/// The stake pool: entrants, their aggregate balance, and the owner that
/// may settle them.
#[derive(Debug, Clone)]
pub struct StakePool {
    owner: Address,
    minimum_stake: U256,
    entries: Vec<Entry>,
    balance: U256,
    round: u64,
}

impl StakePool {
    /// Create an empty pool in round 0.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            owner: config.owner,
            minimum_stake: config.minimum_stake,
            entries: Vec::new(),
            balance: U256::zero(),
            round: 0,
        }
    }

    /// Create an empty pool for `owner` with the given entry floor.
    #[must_use]
    pub fn initialize(owner: Address, minimum_stake: U256) -> Self {
        Self::new(PoolConfig::new(owner, minimum_stake))
    }

    /// Pool owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Entry floor in wei.
    #[must_use]
    pub fn minimum_stake(&self) -> U256 {
        self.minimum_stake
    }

    /// Aggregate balance of current entries, in wei.
    #[must_use]
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Settlements committed so far.
    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nobody has entered since the last settlement.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entrant accounts in insertion order.
    #[must_use]
    pub fn players(&self) -> Vec<Address> {
        self.entries.iter().map(|e| e.player).collect()
    }

    /// Record an entry.
    ///
    /// # Errors
    ///
    /// `InsufficientStake` below the floor, `PotOverflow` if the pot would
    /// exceed 256 bits. The pool is unchanged on error.
    pub fn enter(&mut self, caller: Address, stake: U256) -> Result<(), LotteryError> {
        if stake < self.minimum_stake {
            return Err(LotteryError::InsufficientStake {
                stake,
                minimum: self.minimum_stake,
            });
        }
        let balance = self
            .balance
            .checked_add(stake)
            .ok_or(LotteryError::PotOverflow {
                pot: self.balance,
                stake,
            })?;

        self.entries.push(Entry {
            player: caller,
            stake,
        });
        self.balance = balance;
        Ok(())
    }

    /// Check that `caller` may settle the pool now.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for anyone but the owner, then `EmptyPool`.
    pub fn authorize_settlement(&self, caller: Address) -> Result<(), LotteryError> {
        if caller != self.owner {
            return Err(LotteryError::Unauthorized { caller });
        }
        if self.entries.is_empty() {
            return Err(LotteryError::EmptyPool);
        }
        Ok(())
    }

    /// Pick a winner and compute the payout without touching the pool.
    ///
    /// # Errors
    ///
    /// Same as [`Self::authorize_settlement`].
    pub fn stage_settlement(
        &self,
        caller: Address,
        entropy: &[u8; 32],
    ) -> Result<Settlement, LotteryError> {
        self.authorize_settlement(caller)?;

        let seed = derive_seed(entropy, &caller, &self.entries);
        let winner_index =
            select_index(&seed, self.entries.len()).ok_or(LotteryError::EmptyPool)?;

        Ok(Settlement {
            winner: self.entries[winner_index].player,
            winner_index,
            amount: self.balance,
            entrants: self.entries.len(),
            round: self.round,
        })
    }

    /// Apply a staged settlement: clear entries, zero the pot, advance the
    /// round. Call only after the payout succeeded.
    ///
    /// # Errors
    ///
    /// `StaleSettlement` if the round, pot or entry count moved since
    /// staging. The pool is unchanged on error.
    pub fn commit_settlement(&mut self, settlement: &Settlement) -> Result<(), LotteryError> {
        if settlement.round != self.round
            || settlement.amount != self.balance
            || settlement.entrants != self.entries.len()
        {
            return Err(LotteryError::StaleSettlement {
                staged_round: settlement.round,
                staged_entrants: settlement.entrants,
                round: self.round,
                entrants: self.entries.len(),
            });
        }

        self.entries.clear();
        self.balance = U256::zero();
        self.round += 1;
        Ok(())
    }

    /// Copy the full state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            owner: self.owner,
            minimum_stake: self.minimum_stake,
            entries: self.entries.clone(),
            balance: self.balance,
            round: self.round,
        }
    }

    /// Rebuild a pool from a snapshot, rejecting any that break an invariant.
    ///
    /// # Errors
    ///
    /// `CorruptSnapshot` listing the violations.
    pub fn restore(snapshot: PoolSnapshot) -> Result<Self, LotteryError> {
        if let InvariantCheckResult::Invalid(violations) = check_all_invariants(&snapshot) {
            let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(LotteryError::CorruptSnapshot(reasons.join("; ")));
        }

        Ok(Self {
            owner: snapshot.owner,
            minimum_stake: snapshot.minimum_stake,
            entries: snapshot.entries,
            balance: snapshot.balance,
            round: snapshot.round,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
