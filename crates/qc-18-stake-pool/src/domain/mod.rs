//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the stake pool.
//! NO I/O, NO async, NO external dependencies.
//!
//! - `entities`: `StakePool` state machine, `Entry`, `Settlement`, `PoolSnapshot`
//! - `services`: seed derivation and winner index selection
//! - `invariants`: runtime checks of pool invariants
//! - `value_objects`: `Address`, `U256`, ether units

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
