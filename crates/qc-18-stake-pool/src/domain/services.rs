//! # Domain Services
//!
//! Pure functions for winner selection.
//!
//! ## Seed Construction
//!
//! ```text
//! pool_digest = keccak256(player_0 || be256(stake_0) || player_1 || be256(stake_1) || ...)
//! seed        = keccak256(entropy || caller || be64(len) || pool_digest)
//! index       = U256(seed) mod len
//! ```
//!
//! The entropy comes from a `RandomnessSource`. Mixing in the caller and the
//! pool composition follows the chain-derived pseudo-randomness this engine
//! replaces. The result is NOT cryptographically secure.

use crate::domain::entities::Entry;
use crate::domain::value_objects::{Address, U256};
use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Digest of the ordered pool contents.
#[must_use]
pub fn pool_digest(entries: &[Entry]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    let mut stake_bytes = [0u8; 32];
    for entry in entries {
        hasher.update(entry.player.as_bytes());
        entry.stake.to_big_endian(&mut stake_bytes);
        hasher.update(stake_bytes);
    }
    hasher.finalize().into()
}

/// Derive the settlement seed from entropy, caller, and pool composition.
#[must_use]
pub fn derive_seed(entropy: &[u8; 32], caller: &Address, entries: &[Entry]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(entropy);
    hasher.update(caller.as_bytes());
    hasher.update((entries.len() as u64).to_be_bytes());
    hasher.update(pool_digest(entries));
    hasher.finalize().into()
}

/// Reduce a seed to an index in `0..len`.
///
/// Returns `None` for an empty pool.
#[must_use]
pub fn select_index(seed: &[u8; 32], len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = U256::from_big_endian(seed) % U256::from(len);
    // index < len <= usize::MAX
    Some(index.low_u64() as usize)
}
