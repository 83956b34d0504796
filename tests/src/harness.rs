//! # Simulated Chain Harness
//!
//! Drives a `LotteryService` the way a client drives the deployed contract:
//! the attached value leaves the sender's account before the call and is
//! refunded if the call reverts.

use std::sync::Arc;

use qc_18_stake_pool::prelude::*;
use thiserror::Error;

/// Accounts created by [`SimulatedChain::deploy`].
pub const ACCOUNT_COUNT: usize = 10;

/// Starting balance of every account, in ether.
pub const INITIAL_BALANCE: &str = "100";

/// Errors surfaced to a test acting as a chain client.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Sender could not cover the attached value.
    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),

    /// The lottery call reverted.
    #[error("reverted: {0}")]
    Reverted(#[from] LotteryError),
}

/// A funded set of accounts plus one deployed lottery.
pub struct SimulatedChain<R: RandomnessSource = ClockEntropy> {
    /// Funded accounts; `accounts[0]` deployed the lottery and owns it.
    pub accounts: Vec<Address>,
    /// Shared account balances.
    pub ledger: Arc<InMemoryLedger>,
    /// The lottery under test.
    pub lottery: LotteryService<InMemoryLedger, R>,
}

/// Deterministic account address `i`.
#[must_use]
pub fn account(i: usize) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xAC;
    bytes[12..].copy_from_slice(&(i as u64).to_be_bytes());
    Address::new(bytes)
}

/// Shorthand for `parse_ether` on literals.
///
/// # Panics
///
/// On a malformed literal.
#[must_use]
pub fn ether(amount: &str) -> U256 {
    parse_ether(amount).expect("valid ether literal")
}

impl SimulatedChain<ClockEntropy> {
    /// Fund accounts and deploy a lottery owned by `accounts[0]`.
    #[must_use]
    pub fn deploy(minimum_stake: &str) -> Self {
        Self::deploy_with(minimum_stake, ClockEntropy::new())
    }
}

impl<R: RandomnessSource> SimulatedChain<R> {
    /// Deploy with a specific entropy source.
    #[must_use]
    pub fn deploy_with(minimum_stake: &str, randomness: R) -> Self {
        let accounts: Vec<Address> = (0..ACCOUNT_COUNT).map(account).collect();
        let ledger = Arc::new(InMemoryLedger::funded(&accounts, ether(INITIAL_BALANCE)));
        let lottery = LotteryService::initialize(
            PoolConfig::new(accounts[0], ether(minimum_stake)),
            Arc::clone(&ledger),
            randomness,
        );
        Self {
            accounts,
            ledger,
            lottery,
        }
    }

    /// Owner of the deployed lottery.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.accounts[0]
    }

    /// `enter()` with `value` ether attached.
    ///
    /// # Errors
    ///
    /// `Ledger` if `from` cannot pay, `Reverted` if the lottery refuses the
    /// entry (the value is refunded).
    pub async fn enter(&self, from: Address, value: &str) -> Result<(), ChainError> {
        let value = ether(value);
        self.ledger.debit(from, value)?;
        if let Err(err) = self.lottery.enter(from, value).await {
            self.ledger.credit(from, value)?;
            return Err(err.into());
        }
        Ok(())
    }

    /// `getPlayers()` called by `from`.
    pub async fn players(&self, from: Address) -> Vec<Address> {
        self.lottery.get_players(from).await
    }

    /// `pickWinner()` sent by `from`.
    ///
    /// # Errors
    ///
    /// `Reverted` with the lottery's error.
    pub async fn pick_winner(&self, from: Address) -> Result<SettlementReceipt, ChainError> {
        Ok(self.lottery.select_winner(from).await?)
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance(&self, account: &Address) -> U256 {
        self.ledger.balance(account)
    }

    /// Value held by accounts plus value held by the pool.
    pub async fn total_value(&self) -> U256 {
        self.ledger.total() + self.lottery.pot().await
    }
}
