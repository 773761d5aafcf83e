use crate::api::TransactionVariant;

/// Errors produced while decoding node API responses into typed values.
///
/// Every variant carries enough context (field name, offending value, byte
/// lengths) to diagnose the failure without re-inspecting the raw input.
/// Decode errors are always recoverable by the caller.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("invalid quantity `{value}`: {reason}")]
    InvalidQuantity { value: String, reason: String },

    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("wrong byte length for {material}: expected {expected}, got {actual}")]
    WrongLength {
        material: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {material}: {reason}")]
    InvalidMaterial {
        material: &'static str,
        reason: String,
    },
}

/// A checked narrowing accessor was invoked against the wrong variant.
///
/// Names both the variant the caller asked for and the one actually held,
/// so the mismatch is diagnosable from the message alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transaction type is not {requested}: {actual}")]
pub struct NarrowingError {
    pub requested: TransactionVariant,
    pub actual: TransactionVariant,
}

/// Errors produced while signing. Verification failures are not errors:
/// `verify` returns a plain `bool`.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("key material error: {0}")]
    KeyMaterial(String),

    #[error("not enough signers: have {available}, threshold is {threshold}")]
    NotEnoughSigners { available: usize, threshold: usize },

    #[error("signer index {index} out of range for {count} public keys")]
    SignerIndexOutOfRange { index: usize, count: usize },

    #[error("serialization failure: {0}")]
    Serialization(String),
}
