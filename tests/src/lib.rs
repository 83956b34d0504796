//! # Stake Pool Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # SimulatedChain: funded accounts + deployed lottery
//! └── integration/      # End-to-end flows and concurrency
//!     ├── lottery_flows.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod harness;
