//! # Lottery Service
//!
//! Serializes all pool operations behind one async mutex and runs
//! settlement as a transaction:
//!
//! ```text
//! lock ─→ authorize ─→ draw entropy ─→ stage ─→ transfer ─┬─ Ok  ─→ commit ─→ unlock
//!                                                         └─ Err ─→ drop stage ─→ unlock
//! ```
//!
//! The lock is held across the awaited transfer, so no entry can land
//! between staging and commit and two settlements cannot race.

use crate::adapters::{InMemoryLedger, ThreadRngEntropy};
use crate::domain::entities::{PoolConfig, PoolSnapshot, SettlementReceipt, StakePool};
use crate::domain::value_objects::{Address, U256};
use crate::errors::LotteryError;
use crate::ports::inbound::LotteryApi;
use crate::ports::outbound::{PayoutLedger, RandomnessSource};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Counters for the Lottery Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Entries accepted.
    pub entries_accepted: u64,
    /// Entries rejected for insufficient stake.
    pub entries_rejected: u64,
    /// Settlements committed.
    pub settlements_completed: u64,
    /// Settlements rolled back after a failed payout.
    pub settlements_failed: u64,
    /// Settlement attempts by non-owners or on an empty pool.
    pub rejected_settlements: u64,
    /// Total wei paid to winners.
    pub total_paid_out: U256,
}

/// The stake pool engine.
pub struct LotteryService<L: PayoutLedger, R: RandomnessSource> {
    /// Fixed at initialization; readable without the lock.
    config: PoolConfig,
    /// Pool state. Every operation goes through this lock.
    pool: Mutex<StakePool>,
    /// Payout ledger adapter.
    ledger: Arc<L>,
    /// Entropy adapter.
    randomness: R,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<L: PayoutLedger, R: RandomnessSource> LotteryService<L, R> {
    /// Create an engine with an empty pool.
    pub fn initialize(config: PoolConfig, ledger: Arc<L>, randomness: R) -> Self {
        info!(
            owner = %config.owner,
            minimum_stake = %config.minimum_stake,
            "Stake pool initialized"
        );
        Self::with_pool(StakePool::new(config), ledger, randomness)
    }

    /// Resume an engine from a persisted snapshot.
    ///
    /// # Errors
    ///
    /// `CorruptSnapshot` if the snapshot breaks a pool invariant.
    pub fn restore(
        snapshot: PoolSnapshot,
        ledger: Arc<L>,
        randomness: R,
    ) -> Result<Self, LotteryError> {
        let pool = StakePool::restore(snapshot)?;
        info!(
            owner = %pool.owner(),
            entries = pool.len(),
            pot = %pool.balance(),
            round = pool.round(),
            "Stake pool restored from snapshot"
        );
        Ok(Self::with_pool(pool, ledger, randomness))
    }

    fn with_pool(pool: StakePool, ledger: Arc<L>, randomness: R) -> Self {
        Self {
            config: PoolConfig::new(pool.owner(), pool.minimum_stake()),
            pool: Mutex::new(pool),
            ledger,
            randomness,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Pool owner.
    pub fn owner(&self) -> Address {
        self.config.owner
    }

    /// Entry floor in wei.
    pub fn minimum_stake(&self) -> U256 {
        self.config.minimum_stake
    }

    /// The payout ledger this engine settles into.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Aggregate balance of current entries.
    pub async fn pot(&self) -> U256 {
        self.pool.lock().await.balance()
    }

    /// Settlements committed so far.
    pub async fn round(&self) -> u64 {
        self.pool.lock().await.round()
    }

    /// Copy of the full pool state for persistence.
    pub async fn snapshot(&self) -> PoolSnapshot {
        self.pool.lock().await.snapshot()
    }

    /// Current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }
}

/// Create a service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service(
    owner: Address,
    minimum_stake: U256,
) -> LotteryService<InMemoryLedger, ThreadRngEntropy> {
    LotteryService::initialize(
        PoolConfig::new(owner, minimum_stake),
        Arc::new(InMemoryLedger::new()),
        ThreadRngEntropy,
    )
}

// =============================================================================
// LotteryApi Implementation
// =============================================================================

#[async_trait]
impl<L: PayoutLedger, R: RandomnessSource> LotteryApi for LotteryService<L, R> {
    #[instrument(skip(self), fields(caller = %caller, stake = %stake))]
    async fn enter(&self, caller: Address, stake: U256) -> Result<(), LotteryError> {
        let mut pool = self.pool.lock().await;

        match pool.enter(caller, stake) {
            Ok(()) => {
                debug!(entries = pool.len(), pot = %pool.balance(), "Entry accepted");
                drop(pool);
                self.stats.write().await.entries_accepted += 1;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Entry rejected");
                drop(pool);
                self.stats.write().await.entries_rejected += 1;
                Err(err)
            }
        }
    }

    async fn get_players(&self, _caller: Address) -> Vec<Address> {
        self.pool.lock().await.players()
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn select_winner(&self, caller: Address) -> Result<SettlementReceipt, LotteryError> {
        let mut pool = self.pool.lock().await;

        if let Err(err) = pool.authorize_settlement(caller) {
            warn!(error = %err, "Settlement rejected");
            drop(pool);
            self.stats.write().await.rejected_settlements += 1;
            return Err(err);
        }

        let entropy = self.randomness.entropy();
        let settlement = pool.stage_settlement(caller, &entropy)?;
        let settlement_id = Uuid::new_v4();

        debug!(
            %settlement_id,
            winner = %settlement.winner(),
            winner_index = settlement.winner_index(),
            entrants = settlement.entrants(),
            "Settlement staged"
        );

        if let Err(source) = self
            .ledger
            .transfer(settlement.winner(), settlement.amount())
            .await
        {
            error!(
                %settlement_id,
                winner = %settlement.winner(),
                amount = %settlement.amount(),
                error = %source,
                "Payout failed, settlement discarded"
            );
            drop(pool);
            self.stats.write().await.settlements_failed += 1;
            return Err(LotteryError::SettlementTransferFailed {
                winner: settlement.winner(),
                amount: settlement.amount(),
                source,
            });
        }

        pool.commit_settlement(&settlement)?;
        drop(pool);

        let receipt = SettlementReceipt::new(settlement_id, &settlement);
        {
            let mut stats = self.stats.write().await;
            stats.settlements_completed += 1;
            stats.total_paid_out = stats.total_paid_out.saturating_add(receipt.amount);
        }

        info!(
            %settlement_id,
            winner = %receipt.winner,
            amount = %receipt.amount,
            entrants = receipt.entrants,
            round = receipt.round,
            "Winner paid, pool reset"
        );
        Ok(receipt)
    }
}

// =============================================================================
// TESTS
// =============================================================================
