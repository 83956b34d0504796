//! # Domain Invariants
//!
//! Invariants that MUST hold for any pool state. `StakePool` upholds them
//! by construction; these checks guard snapshots restored from storage.
//!
//! - INVARIANT-1: Minimum Stake (every entry's stake >= floor)
//! - INVARIANT-2: Pot Conservation (balance == sum of entry stakes)
//! - INVARIANT-3: Owner Present (owner is not the zero address)
//!
//! A restored snapshot must also carry a positive entry floor, the same rule
//! `PoolConfig::validate` applies to fresh configuration.
//!
//! INVARIANT-4 (settlement only on a non-empty pool) is enforced by
//! `StakePool::authorize_settlement` rather than checked here.

use crate::domain::entities::{Entry, PoolSnapshot};
use crate::domain::value_objects::{Address, U256};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Minimum Stake
///
/// Returns the index of the first entry below the floor, if any.
#[must_use]
pub fn check_minimum_stake_invariant(entries: &[Entry], minimum: U256) -> Option<usize> {
    entries.iter().position(|e| e.stake < minimum)
}

/// INVARIANT-2: Pot Conservation
///
/// Overflowing sums never match.
#[must_use]
pub fn check_balance_invariant(entries: &[Entry], balance: U256) -> bool {
    entries
        .iter()
        .try_fold(U256::zero(), |acc, e| acc.checked_add(e.stake))
        .is_some_and(|sum| sum == balance)
}

/// INVARIANT-3: Owner Present
#[must_use]
pub fn check_owner_invariant(owner: &Address) -> bool {
    !owner.is_zero()
}

/// Entry floor is positive.
#[must_use]
pub fn check_minimum_stake_positive(minimum: U256) -> bool {
    !minimum.is_zero()
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(snapshot: &PoolSnapshot) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_minimum_stake_positive(snapshot.minimum_stake) {
        violations.push(InvariantViolation::ZeroMinimumStake);
    }

    if let Some(index) = check_minimum_stake_invariant(&snapshot.entries, snapshot.minimum_stake)
    {
        violations.push(InvariantViolation::StakeBelowMinimum {
            index,
            stake: snapshot.entries[index].stake,
            minimum: snapshot.minimum_stake,
        });
    }

    if !check_balance_invariant(&snapshot.entries, snapshot.balance) {
        violations.push(InvariantViolation::BalanceMismatch {
            balance: snapshot.balance,
            entries: snapshot.entries.len(),
        });
    }

    if !check_owner_invariant(&snapshot.owner) {
        violations.push(InvariantViolation::MissingOwner);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An entry was recorded below the floor.
    StakeBelowMinimum {
        index: usize,
        stake: U256,
        minimum: U256,
    },
    /// Pot does not equal the sum of stakes.
    BalanceMismatch { balance: U256, entries: usize },
    /// Owner is the zero address.
    MissingOwner,
    /// Entry floor is zero.
    ZeroMinimumStake,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StakeBelowMinimum {
                index,
                stake,
                minimum,
            } => {
                write!(f, "entry {index} stake {stake} below minimum {minimum}")
            }
            Self::BalanceMismatch { balance, entries } => {
                write!(
                    f,
                    "balance {balance} does not match the stakes of {entries} entries"
                )
            }
            Self::MissingOwner => write!(f, "owner is the zero address"),
            Self::ZeroMinimumStake => write!(f, "minimum stake is zero"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
