//! # QC-18 Stake Pool - Lottery Settlement Subsystem
//!
//! **Subsystem ID:** 18
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Accepts entries above a minimum stake, lets a single owner trigger
//! settlement, and pays the whole pot to one uniformly chosen entry while
//! resetting the pool for the next round.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Stake >= minimum for every entry | `domain/entities.rs` - `StakePool::enter()` |
//! | INVARIANT-2 | Pot == sum of entry stakes | `domain/entities.rs` - `enter()` / `commit_settlement()` |
//! | INVARIANT-3 | Owner set at initialization, never changed | `domain/entities.rs` - no setter exists |
//! | INVARIANT-4 | Settlement only on a non-empty pool | `domain/entities.rs` - `authorize_settlement()` |
//! | INVARIANT-5 | All-or-nothing settlement | `service.rs` - stage / transfer / commit |
//!
//! ## Settlement
//!
//! ```text
//! [OPEN] ──select_winner──→ (SETTLING, under lock) ──payout ok──→ [OPEN, empty]
//!                                   │
//!                                   └── payout failed ──→ [OPEN, unchanged]
//! ```
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `PayoutLedger` | Credit the pot to the winner |
//! | `RandomnessSource` | 32 bytes of entropy per settlement |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/ - InMemoryLedger, entropy sources                    │
//! │  service.rs - LotteryService (locking, transactional payout)    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - LotteryApi trait                           │
//! │  ports/outbound.rs - PayoutLedger, RandomnessSource traits      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs      - StakePool, Entry, Settlement         │
//! │  domain/services.rs      - seed derivation, index selection     │
//! │  domain/invariants.rs    - snapshot invariant checks            │
//! │  domain/value_objects.rs - Address, U256, ether units           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_stake_pool::prelude::*;
//!
//! let service = LotteryService::initialize(
//!     PoolConfig::new(owner, parse_ether("0.01")?),
//!     Arc::new(InMemoryLedger::new()),
//!     ClockEntropy::new(),
//! );
//! service.enter(player, parse_ether("0.02")?).await?;
//! let receipt = service.select_winner(owner).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;
pub mod telemetry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Entry, PoolConfig, PoolSnapshot, Settlement, SettlementReceipt, StakePool,
    };

    // Value objects
    pub use crate::domain::value_objects::{format_ether, parse_ether, Address, U256};

    // Domain services
    pub use crate::domain::services::{derive_seed, keccak256, pool_digest, select_index};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::LotteryApi;
    pub use crate::ports::outbound::{PayoutLedger, RandomnessSource};

    // Errors
    pub use crate::errors::{ConfigError, LedgerError, LotteryError, TelemetryError, UnitError};

    // Adapters
    pub use crate::adapters::{ClockEntropy, FixedEntropy, InMemoryLedger, ThreadRngEntropy};

    // Service
    pub use crate::config::ServiceConfig;
    pub use crate::service::{create_test_service, LotteryService, ServiceStats};
    pub use crate::telemetry::init_tracing;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 18;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Stake Pool";

// =============================================================================
// TESTS
// =============================================================================
