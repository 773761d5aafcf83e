//! 32-byte account addresses.
//!
//! The node API prints addresses as `0x`-prefixed hex but accepts short
//! forms (`0x1` for the framework address, for example). Parsing left-pads
//! short input with zero bytes; output is always the full 64-digit form.

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;
use crate::hex;

/// Address length in bytes.
pub const ADDRESS_LENGTH: usize = 32;

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, BorshSerialize, BorshDeserialize,
)]
pub struct AccountAddress(pub [u8; ADDRESS_LENGTH]);

impl AccountAddress {
    /// The reserved `0x1` address.
    pub const ONE: AccountAddress = {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 1;
        AccountAddress(bytes)
    };

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::to_hex(&self.0)
    }

    /// Parse an address from hex, with or without the `0x` prefix.
    ///
    /// Input shorter than 64 digits is left-padded with zeros, matching the
    /// node's relaxed address formatting. Longer input fails.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if stripped.is_empty() {
            return Err(DecodeError::InvalidMaterial {
                material: "account address",
                reason: "empty hex string".to_string(),
            });
        }
        if stripped.len() > ADDRESS_LENGTH * 2 {
            return Err(DecodeError::WrongLength {
                material: "account address",
                expected: ADDRESS_LENGTH,
                actual: stripped.len().div_ceil(2),
            });
        }
        let padded = format!("{stripped:0>width$}", width = ADDRESS_LENGTH * 2);
        let bytes = hex::from_hex(&padded)?;
        let mut out = [0u8; ADDRESS_LENGTH];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_is_left_padded() {
        let one = AccountAddress::from_hex("0x1").expect("short form");
        assert_eq!(one, AccountAddress::ONE);
        assert_eq!(
            one.to_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn odd_length_short_form_parses() {
        let a = AccountAddress::from_hex("0xabc").expect("odd short form");
        assert!(a.to_hex().ends_with("abc"));
    }

    #[test]
    fn full_form_round_trips() {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = 0xde;
        bytes[31] = 0x0f;
        let a = AccountAddress(bytes);
        assert_eq!(AccountAddress::from_hex(&a.to_hex()).expect("full form"), a);
    }

    #[test]
    fn too_long_fails() {
        let long = format!("0x{}", "ff".repeat(ADDRESS_LENGTH + 1));
        assert!(AccountAddress::from_hex(&long).is_err());
    }

    #[test]
    fn empty_fails() {
        assert!(AccountAddress::from_hex("").is_err());
        assert!(AccountAddress::from_hex("0x").is_err());
    }

    #[test]
    fn non_hex_fails() {
        assert!(AccountAddress::from_hex("0xgg").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let a = AccountAddress::ONE;
        let json = serde_json::to_string(&a).expect("serialize");
        let back: AccountAddress = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, a);
    }

    #[test]
    fn deserialize_accepts_short_form() {
        let a: AccountAddress = serde_json::from_str("\"0x1\"").expect("short form");
        assert_eq!(a, AccountAddress::ONE);
    }
}
