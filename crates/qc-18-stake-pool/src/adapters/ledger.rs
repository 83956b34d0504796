//! # Ledger Adapter
//!
//! In-memory account balances implementing `PayoutLedger`.
//! A production deployment would back this with chain state.

use crate::domain::value_objects::{Address, U256};
use crate::errors::LedgerError;
use crate::ports::outbound::PayoutLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// In-memory balances with per-account transfer rejection.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Account balances in wei.
    balances: RwLock<HashMap<Address, U256>>,
    /// Accounts that refuse incoming transfers.
    rejecting: RwLock<HashSet<Address>>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with every account funded with `amount`.
    #[must_use]
    pub fn funded(accounts: &[Address], amount: U256) -> Self {
        let ledger = Self::new();
        for account in accounts {
            ledger.set_balance(*account, amount);
        }
        ledger
    }

    /// Overwrite the balance of `account`.
    pub fn set_balance(&self, account: Address, amount: U256) {
        self.balances.write().insert(account, amount);
    }

    /// Balance of `account`; zero if unknown.
    #[must_use]
    pub fn balance(&self, account: &Address) -> U256 {
        self.balances
            .read()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total(&self) -> U256 {
        self.balances
            .read()
            .values()
            .fold(U256::zero(), |acc, b| acc.saturating_add(*b))
    }

    /// Withdraw `amount` from `from`.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` if the balance is too low; nothing is withdrawn.
    pub fn debit(&self, from: Address, amount: U256) -> Result<(), LedgerError> {
        let mut balances = self.balances.write();
        let available = balances.get(&from).copied().unwrap_or_default();
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                from,
                required: amount,
                available,
            })?;
        balances.insert(from, remaining);
        Ok(())
    }

    /// Deposit `amount` into `to`, bypassing rejection.
    ///
    /// # Errors
    ///
    /// `BalanceOverflow` if the balance would exceed 256 bits.
    pub fn credit(&self, to: Address, amount: U256) -> Result<(), LedgerError> {
        let mut balances = self.balances.write();
        let balance = balances.entry(to).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { to })?;
        Ok(())
    }

    /// Make `account` refuse incoming payouts.
    pub fn reject_transfers_to(&self, account: Address) {
        self.rejecting.write().insert(account);
    }

    /// Make `account` accept incoming payouts again.
    pub fn accept_transfers_to(&self, account: Address) {
        self.rejecting.write().remove(&account);
    }
}

#[async_trait]
impl PayoutLedger for InMemoryLedger {
    async fn transfer(&self, to: Address, amount: U256) -> Result<(), LedgerError> {
        if self.rejecting.read().contains(&to) {
            return Err(LedgerError::TransferRejected { to });
        }
        self.credit(to, amount)?;
        debug!(%to, %amount, "Ledger credited payout");
        Ok(())
    }

    async fn balance_of(&self, account: Address) -> Result<U256, LedgerError> {
        Ok(self.balance(&account))
    }
}

// =============================================================================
// TESTS
// =============================================================================
