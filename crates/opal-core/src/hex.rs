//! `0x`-prefixed hex codec for digests, addresses, and key material.
//!
//! Encoding always emits a `0x` prefix and lowercase digits regardless of
//! input convention; decoding accepts input with or without the prefix
//! (case-insensitive) and fails on odd length or non-hex characters.

use crate::error::DecodeError;

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string, tolerating a leading `0x`/`0X` prefix.
pub fn from_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let stripped = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Ok(hex::decode(stripped)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_hex_emits_prefix_and_lowercase() {
        assert_eq!(to_hex(&[0xab, 0xcd, 0xef]), "0xabcdef");
        assert_eq!(to_hex(&[]), "0x");
    }

    #[test]
    fn from_hex_accepts_prefixed_and_bare() {
        assert_eq!(from_hex("0xdeadbeef").expect("prefixed"), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(from_hex("deadbeef").expect("bare"), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(from_hex("0XDEADBEEF").expect("uppercase"), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn from_hex_rejects_odd_length() {
        assert!(from_hex("0xabc").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_characters() {
        assert!(from_hex("0xzz").is_err());
        assert!(from_hex("0x 12").is_err());
    }

    #[test]
    fn round_trip_canonicalizes() {
        for input in ["0xAbCd12", "abcd12", "0XABCD12"] {
            let bytes = from_hex(input).expect("valid hex");
            assert_eq!(to_hex(&bytes), "0xabcd12");
        }
    }

    #[test]
    fn empty_string_decodes_to_empty() {
        assert!(from_hex("").expect("empty is valid").is_empty());
        assert!(from_hex("0x").expect("bare prefix is valid").is_empty());
    }
}
