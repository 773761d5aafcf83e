//! Node API transaction model.
//!
//! The node reports every transaction as a JSON document tagged by a `type`
//! field. [`decode_transaction`] resolves that discriminant first, then
//! parses the full document into exactly one concrete record; the resulting
//! [`Transaction`] holds tag and payload inseparably, and checked narrowing
//! accessors (`as_user`, `as_pending`, ...) fail with a [`NarrowingError`]
//! naming both variants instead of panicking or defaulting.

mod transactions;
mod types;

pub use transactions::{
    BlockMetadataTransaction, GenesisTransaction, PendingTransaction, StateCheckpointTransaction,
    SubmitTransactionResponse, TransactionInfo, UserTransaction, ValidatorTransaction,
};
pub use types::{Event, TransactionPayload, TransactionSignature, WriteSetChange};

use std::fmt;

use crate::error::{DecodeError, NarrowingError};
use crate::hash::HashValue;

// ==============================================================================
// Variant discriminant
// ==============================================================================

/// The wire discriminant selecting which concrete record a transaction
/// document parses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionVariant {
    Pending,
    User,
    Genesis,
    BlockMetadata,
    StateCheckpoint,
    Validator,
}

impl TransactionVariant {
    /// The exact `type` string the node sends for this variant.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Self::Pending => "pending_transaction",
            Self::User => "user_transaction",
            Self::Genesis => "genesis_transaction",
            Self::BlockMetadata => "block_metadata_transaction",
            Self::StateCheckpoint => "state_checkpoint_transaction",
            Self::Validator => "validator_transaction",
        }
    }

    /// Map a wire `type` string to a variant. Unrecognized tags map to
    /// `None`; there is deliberately no catch-all variant.
    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            "pending_transaction" => Some(Self::Pending),
            "user_transaction" => Some(Self::User),
            "genesis_transaction" => Some(Self::Genesis),
            "block_metadata_transaction" => Some(Self::BlockMetadata),
            "state_checkpoint_transaction" => Some(Self::StateCheckpoint),
            "validator_transaction" => Some(Self::Validator),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_tag())
    }
}

// ==============================================================================
// Envelope
// ==============================================================================

/// One decoded transaction, tagged with its concrete kind.
///
/// Constructed only by [`decode_transaction`] / [`Transaction::from_json`],
/// so the discriminant and the payload can never disagree.
#[derive(Debug, Clone)]
pub enum Transaction {
    Pending(PendingTransaction),
    User(UserTransaction),
    Genesis(GenesisTransaction),
    BlockMetadata(BlockMetadataTransaction),
    StateCheckpoint(StateCheckpointTransaction),
    Validator(ValidatorTransaction),
}

/// Decode a raw JSON document from the node into a [`Transaction`].
pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction, DecodeError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    Transaction::from_json(value)
}

impl Transaction {
    /// Two-pass decode: resolve the `type` discriminant first, then parse
    /// the entire document against the chosen variant's full field set.
    /// Nested decode errors propagate unchanged.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DecodeError> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or(DecodeError::MissingField("type"))?;
        let variant = TransactionVariant::from_wire_tag(tag)
            .ok_or_else(|| DecodeError::UnknownTransactionType(tag.to_string()))?;

        let txn = match variant {
            TransactionVariant::Pending => Self::Pending(serde_json::from_value(value)?),
            TransactionVariant::User => Self::User(serde_json::from_value(value)?),
            TransactionVariant::Genesis => Self::Genesis(serde_json::from_value(value)?),
            TransactionVariant::BlockMetadata => Self::BlockMetadata(serde_json::from_value(value)?),
            TransactionVariant::StateCheckpoint => {
                Self::StateCheckpoint(serde_json::from_value(value)?)
            }
            TransactionVariant::Validator => Self::Validator(serde_json::from_value(value)?),
        };
        tracing::trace!(variant = %txn.variant(), hash = %txn.hash(), "decoded transaction");
        Ok(txn)
    }

    /// The variant tag this envelope was decoded as.
    pub fn variant(&self) -> TransactionVariant {
        match self {
            Self::Pending(_) => TransactionVariant::Pending,
            Self::User(_) => TransactionVariant::User,
            Self::Genesis(_) => TransactionVariant::Genesis,
            Self::BlockMetadata(_) => TransactionVariant::BlockMetadata,
            Self::StateCheckpoint(_) => TransactionVariant::StateCheckpoint,
            Self::Validator(_) => TransactionVariant::Validator,
        }
    }

    fn info(&self) -> &dyn TransactionInfo {
        match self {
            Self::Pending(t) => t,
            Self::User(t) => t,
            Self::Genesis(t) => t,
            Self::BlockMetadata(t) => t,
            Self::StateCheckpoint(t) => t,
            Self::Validator(t) => t,
        }
    }

    /// Hash of the transaction for on-chain lookup.
    pub fn hash(&self) -> &HashValue {
        self.info().hash()
    }

    /// Whether the transaction executed successfully. `None` for pending
    /// transactions, which have no outcome yet.
    pub fn success(&self) -> Option<bool> {
        self.info().success()
    }

    /// Ledger version, `None` for pending transactions.
    pub fn version(&self) -> Option<u64> {
        self.info().version()
    }

    fn narrow_err(&self, requested: TransactionVariant) -> NarrowingError {
        NarrowingError {
            requested,
            actual: self.variant(),
        }
    }

    /// Narrow to a pending transaction, failing if this is any other kind.
    pub fn as_pending(&self) -> Result<&PendingTransaction, NarrowingError> {
        match self {
            Self::Pending(t) => Ok(t),
            _ => Err(self.narrow_err(TransactionVariant::Pending)),
        }
    }

    /// Narrow to a user transaction, failing if this is any other kind.
    pub fn as_user(&self) -> Result<&UserTransaction, NarrowingError> {
        match self {
            Self::User(t) => Ok(t),
            _ => Err(self.narrow_err(TransactionVariant::User)),
        }
    }

    /// Narrow to the genesis transaction, failing if this is any other kind.
    pub fn as_genesis(&self) -> Result<&GenesisTransaction, NarrowingError> {
        match self {
            Self::Genesis(t) => Ok(t),
            _ => Err(self.narrow_err(TransactionVariant::Genesis)),
        }
    }

    /// Narrow to a block metadata transaction, failing if this is any other kind.
    pub fn as_block_metadata(&self) -> Result<&BlockMetadataTransaction, NarrowingError> {
        match self {
            Self::BlockMetadata(t) => Ok(t),
            _ => Err(self.narrow_err(TransactionVariant::BlockMetadata)),
        }
    }

    /// Narrow to a state checkpoint transaction, failing if this is any other kind.
    pub fn as_state_checkpoint(&self) -> Result<&StateCheckpointTransaction, NarrowingError> {
        match self {
            Self::StateCheckpoint(t) => Ok(t),
            _ => Err(self.narrow_err(TransactionVariant::StateCheckpoint)),
        }
    }

    /// Narrow to a validator transaction, failing if this is any other kind.
    pub fn as_validator(&self) -> Result<&ValidatorTransaction, NarrowingError> {
        match self {
            Self::Validator(t) => Ok(t),
            _ => Err(self.narrow_err(TransactionVariant::Validator)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn digest(byte: u8) -> String {
        crate::hex::to_hex(&[byte; 32])
    }

    fn pending_doc() -> serde_json::Value {
        json!({
            "type": "pending_transaction",
            "hash": digest(0x11),
            "sender": "0x1",
            "sequence_number": "7",
            "max_gas_amount": "100000",
            "gas_unit_price": "100",
            "expiration_timestamp_secs": "1700000000",
            "payload": {"function": "0x1::coin::transfer"},
        })
    }

    #[test]
    fn wire_tags_round_trip() {
        for variant in [
            TransactionVariant::Pending,
            TransactionVariant::User,
            TransactionVariant::Genesis,
            TransactionVariant::BlockMetadata,
            TransactionVariant::StateCheckpoint,
            TransactionVariant::Validator,
        ] {
            assert_eq!(
                TransactionVariant::from_wire_tag(variant.wire_tag()),
                Some(variant)
            );
        }
    }

    #[test]
    fn unknown_tag_fails_whole_decode() {
        let doc = json!({"type": "not_a_real_type", "hash": digest(0x22)});
        let err = Transaction::from_json(doc).expect_err("unknown tag");
        match err {
            DecodeError::UnknownTransactionType(tag) => assert_eq!(tag, "not_a_real_type"),
            other => panic!("expected UnknownTransactionType, got {other:?}"),
        }
    }

    #[test]
    fn missing_tag_fails() {
        let err = Transaction::from_json(json!({"hash": digest(0x33)})).expect_err("no type");
        assert!(matches!(err, DecodeError::MissingField("type")));
    }

    #[test]
    fn pending_has_no_success_or_version() {
        let txn = Transaction::from_json(pending_doc()).expect("valid pending");
        assert_eq!(txn.variant(), TransactionVariant::Pending);
        assert_eq!(txn.success(), None);
        assert_eq!(txn.version(), None);
    }

    #[test]
    fn narrowing_mismatch_names_both_variants() {
        let txn = Transaction::from_json(pending_doc()).expect("valid pending");
        assert!(txn.as_pending().is_ok());

        let err = txn.as_user().expect_err("pending is not user");
        assert_eq!(err.requested, TransactionVariant::User);
        assert_eq!(err.actual, TransactionVariant::Pending);
        let msg = err.to_string();
        assert!(msg.contains("user_transaction"));
        assert!(msg.contains("pending_transaction"));
    }

    #[test]
    fn nested_quantity_error_propagates() {
        let mut doc = pending_doc();
        doc["sequence_number"] = json!("not-a-number");
        let err = Transaction::from_json(doc).expect_err("bad quantity");
        assert!(err.to_string().contains("non-decimal"));
    }

    #[test]
    fn malformed_bytes_fail() {
        assert!(decode_transaction(b"{not json").is_err());
    }
}
