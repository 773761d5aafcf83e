//! 32-byte SHA3-256 digest type.

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};

use crate::error::DecodeError;
use crate::hex;

/// Digest length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Fixed 32-byte digest, externally represented as `0x`-prefixed lowercase
/// hex everywhere: JSON, logs, and `Display`.
///
/// This type is `Copy` - digests are passed frequently during decoding and
/// should live on the stack.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, BorshSerialize, BorshDeserialize,
)]
pub struct HashValue(pub [u8; HASH_LENGTH]);

impl HashValue {
    /// A zero-valued digest (all bytes 0x00).
    pub fn zero() -> Self {
        Self([0u8; HASH_LENGTH])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Compute the SHA3-256 digest of `data`.
    pub fn sha3_256(data: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        hex::to_hex(&self.0)
    }

    /// Parse a digest from hex, with or without the `0x` prefix. Fails on
    /// malformed hex or any length other than exactly 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let bytes = hex::from_hex(s)?;
        if bytes.len() != HASH_LENGTH {
            return Err(DecodeError::WrongLength {
                material: "hash",
                expected: HASH_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; HASH_LENGTH];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.to_hex())
    }
}

impl FromStr for HashValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}
