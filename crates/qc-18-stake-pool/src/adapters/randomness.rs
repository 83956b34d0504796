//! # Entropy Adapters
//!
//! `RandomnessSource` implementations. None of them is cryptographically
//! secure; the seed derivation only needs values a caller cannot cheaply
//! predict.

use crate::domain::services::keccak256;
use crate::ports::outbound::RandomnessSource;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock nanoseconds mixed with a monotonic counter.
///
/// The counter keeps two draws within the same clock tick distinct.
#[derive(Debug, Default)]
pub struct ClockEntropy {
    counter: AtomicU64,
}

impl ClockEntropy {
    /// Create a clock-based source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RandomnessSource for ClockEntropy {
    fn entropy(&self) -> [u8; 32] {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let count = self.counter.fetch_add(1, Ordering::Relaxed);

        let mut buf = [0u8; 24];
        buf[..16].copy_from_slice(&nanos.to_be_bytes());
        buf[16..].copy_from_slice(&count.to_be_bytes());
        keccak256(&buf)
    }
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngEntropy;

impl RandomnessSource for ThreadRngEntropy {
    fn entropy(&self) -> [u8; 32] {
        rand::thread_rng().gen()
    }
}

/// Always returns the same value. For deterministic tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub [u8; 32]);

impl RandomnessSource for FixedEntropy {
    fn entropy(&self) -> [u8; 32] {
        self.0
    }
}
