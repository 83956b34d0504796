//! # Adapters Layer (Outer Hexagon)
//!
//! Implementations of the outbound ports:
//! - `ledger`: in-memory `PayoutLedger`
//! - `randomness`: `RandomnessSource` providers

pub mod ledger;
pub mod randomness;

pub use ledger::*;
pub use randomness::*;
