//! # Value Objects
//!
//! Immutable domain primitives for the stake pool.
//! These types represent concepts that are defined by their value, not identity.

use crate::errors::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types; all amounts are in wei.
pub use primitive_types::U256;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte Ethereum-style account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Parses a hex address, with or without the `0x` prefix.
    /// Returns `None` unless the input is exactly 40 hex digits.
    #[must_use]
    pub fn from_hex(input: &str) -> Option<Self> {
        let digits = input.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        let bytes = hex::decode(digits).ok()?;
        Self::from_slice(&bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full lowercase hex form with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// UNITS (ether <-> wei)
// =============================================================================

/// Number of decimal places between ether and wei.
pub const ETHER_DECIMALS: usize = 18;

/// 10^18 wei.
#[must_use]
pub fn wei_per_ether() -> U256 {
    U256::exp10(ETHER_DECIMALS)
}

/// Parses a decimal ether amount (`"0.02"`, `"2"`, `".5"`) into wei.
///
/// # Errors
///
/// Fails on empty input, non-digit characters, more than 18 fractional
/// digits, or a value that does not fit in 256 bits.
pub fn parse_ether(input: &str) -> Result<U256, UnitError> {
    let s = input.trim();
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(UnitError::Empty);
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(UnitError::InvalidDigit(input.to_string()));
    }
    if frac.len() > ETHER_DECIMALS {
        return Err(UnitError::TooManyDecimals {
            digits: frac.len(),
            max: ETHER_DECIMALS,
        });
    }

    let whole_wei = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| UnitError::Overflow(input.to_string()))?
    };
    let frac_wei = if frac.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{frac:0<width$}", width = ETHER_DECIMALS);
        U256::from_dec_str(&padded).map_err(|_| UnitError::Overflow(input.to_string()))?
    };

    whole_wei
        .checked_mul(wei_per_ether())
        .and_then(|w| w.checked_add(frac_wei))
        .ok_or_else(|| UnitError::Overflow(input.to_string()))
}

/// Formats a wei amount as decimal ether with trailing zeros trimmed.
#[must_use]
pub fn format_ether(wei: U256) -> String {
    let (whole, frac) = wei.div_mod(wei_per_ether());
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = ETHER_DECIMALS);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
