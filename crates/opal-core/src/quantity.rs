//! Wire codec for on-chain unsigned integers.
//!
//! The node API transmits 64-bit and 128-bit quantities as decimal JSON
//! strings to avoid the precision loss inherent to JSON's numeric type.
//! [`U64`] and [`U128`] decode those strings strictly and store native
//! integers; nothing in this module ever passes through a float.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

// ==============================================================================
// Strict decimal parsing
// ==============================================================================

fn check_decimal(s: &str) -> Result<(), DecodeError> {
    if s.is_empty() {
        return Err(DecodeError::InvalidQuantity {
            value: s.to_string(),
            reason: "empty string".to_string(),
        });
    }
    // Signs, `+`, hex prefixes, and whitespace all fail this check.
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidQuantity {
            value: s.to_string(),
            reason: "contains a non-decimal character".to_string(),
        });
    }
    Ok(())
}

/// Parse a decimal string into a `u64`, rejecting anything but ASCII digits
/// and values that do not fit in 64 bits.
pub fn parse_u64(s: &str) -> Result<u64, DecodeError> {
    check_decimal(s)?;
    s.parse::<u64>().map_err(|_| DecodeError::InvalidQuantity {
        value: s.to_string(),
        reason: "does not fit in 64 bits".to_string(),
    })
}

/// Parse a decimal string into a `u128`. On-chain integers are at most 128
/// bits wide, so this covers every quantity the node can emit.
pub fn parse_u128(s: &str) -> Result<u128, DecodeError> {
    check_decimal(s)?;
    s.parse::<u128>().map_err(|_| DecodeError::InvalidQuantity {
        value: s.to_string(),
        reason: "does not fit in 128 bits".to_string(),
    })
}

// ==============================================================================
// Wire newtypes
// ==============================================================================

/// A 64-bit on-chain quantity, represented as a decimal string in JSON.
///
/// `Deref<Target = u64>` minimises call-site churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U64(pub u64);

impl From<u64> for U64 {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<U64> for u64 {
    fn from(v: U64) -> Self {
        v.0
    }
}

impl std::ops::Deref for U64 {
    type Target = u64;
    fn deref(&self) -> &u64 {
        &self.0
    }
}

impl fmt::Display for U64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for U64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for U64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_u64(&s).map(U64).map_err(D::Error::custom)
    }
}

/// A 128-bit on-chain quantity, represented as a decimal string in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U128(pub u128);

impl From<u128> for U128 {
    fn from(v: u128) -> Self {
        Self(v)
    }
}

impl From<U128> for u128 {
    fn from(v: U128) -> Self {
        v.0
    }
}

impl std::ops::Deref for U128 {
    type Target = u128;
    fn deref(&self) -> &u128 {
        &self.0
    }
}

impl fmt::Display for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for U128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for U128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_u128(&s).map(U128).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u64_round_trips_boundaries() {
        assert_eq!(parse_u64("0").expect("zero"), 0);
        assert_eq!(parse_u64("1").expect("one"), 1);
        assert_eq!(
            parse_u64("18446744073709551615").expect("u64::MAX"),
            u64::MAX
        );
    }

    #[test]
    fn parse_u64_rejects_overflow() {
        // 2^64 is one past u64::MAX.
        let err = parse_u64("18446744073709551616").expect_err("overflow");
        assert!(err.to_string().contains("does not fit in 64 bits"));
    }

    #[test]
    fn parse_u64_rejects_non_decimal() {
        for bad in ["", "-1", "+1", "0x10", " 1", "1 ", "1.0", "1e3", "abc"] {
            assert!(parse_u64(bad).is_err(), "should reject {bad:?}");
        }
    }

    #[test]
    fn parse_u128_round_trips_boundaries() {
        assert_eq!(
            parse_u128("340282366920938463463374607431768211455").expect("u128::MAX"),
            u128::MAX
        );
        assert!(parse_u128("340282366920938463463374607431768211456").is_err());
    }

    #[test]
    fn u64_serde_uses_decimal_strings() {
        let v = U64(18446744073709551615);
        let json = serde_json::to_string(&v).expect("serialize");
        assert_eq!(json, "\"18446744073709551615\"");
        let back: U64 = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }

    #[test]
    fn u64_rejects_json_numbers() {
        // The wire format always sends quantities as strings.
        assert!(serde_json::from_str::<U64>("42").is_err());
    }

    #[test]
    fn u128_serde_round_trip() {
        let v = U128(u128::MAX);
        let json = serde_json::to_string(&v).expect("serialize");
        let back: U128 = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }
}
