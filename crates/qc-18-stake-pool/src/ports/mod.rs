//! Ports layer for the stake pool subsystem.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to callers
//! - Outbound (Driven) ports: payout ledger and entropy

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
