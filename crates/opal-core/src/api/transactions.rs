//! Concrete transaction records, one per wire variant.
//!
//! Field sets mirror the node API exactly: quantities arrive as decimal
//! strings ([`U64`]), digests and addresses as `0x` hex. Each record
//! implements [`TransactionInfo`] so callers can read the common fields
//! without narrowing first.

use serde::{Deserialize, Serialize};

use crate::address::AccountAddress;
use crate::hash::HashValue;
use crate::quantity::U64;

use super::types::{Event, TransactionPayload, TransactionSignature, WriteSetChange};

/// Common read-only view over all transaction variants.
pub trait TransactionInfo {
    /// The transaction hash. Always present.
    fn hash(&self) -> &HashValue;

    /// Whether execution succeeded. `None` for transactions that have not
    /// executed (pending), never a default boolean.
    fn success(&self) -> Option<bool>;

    /// The ledger version. `None` for transactions not yet on-chain.
    fn version(&self) -> Option<u64>;
}

/// A transaction accepted by the node but not yet committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: HashValue,
    pub sender: AccountAddress,
    pub sequence_number: U64,
    pub max_gas_amount: U64,
    pub gas_unit_price: U64,
    pub expiration_timestamp_secs: U64,
    pub payload: TransactionPayload,
    #[serde(default)]
    pub signature: Option<TransactionSignature>,
}

impl TransactionInfo for PendingTransaction {
    fn hash(&self) -> &HashValue {
        &self.hash
    }
    fn success(&self) -> Option<bool> {
        None
    }
    fn version(&self) -> Option<u64> {
        None
    }
}

/// A committed user-submitted transaction (entry function or script).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTransaction {
    pub version: U64,
    pub hash: HashValue,
    pub accumulator_root_hash: HashValue,
    pub state_change_hash: HashValue,
    pub event_root_hash: HashValue,
    pub gas_used: U64,
    pub success: bool,
    pub vm_status: String,
    pub changes: Vec<WriteSetChange>,
    pub events: Vec<Event>,
    pub sender: AccountAddress,
    pub sequence_number: U64,
    pub max_gas_amount: U64,
    pub gas_unit_price: U64,
    pub expiration_timestamp_secs: U64,
    pub payload: TransactionPayload,
    #[serde(default)]
    pub signature: Option<TransactionSignature>,
    pub timestamp: U64,
    /// Absent on most transactions; only the last transaction in a block
    /// carries it.
    #[serde(default)]
    pub state_checkpoint_hash: Option<HashValue>,
}

impl TransactionInfo for UserTransaction {
    fn hash(&self) -> &HashValue {
        &self.hash
    }
    fn success(&self) -> Option<bool> {
        Some(self.success)
    }
    fn version(&self) -> Option<u64> {
        Some(self.version.0)
    }
}

/// The chain's genesis write set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisTransaction {
    pub version: U64,
    pub hash: HashValue,
    pub accumulator_root_hash: HashValue,
    pub state_change_hash: HashValue,
    pub event_root_hash: HashValue,
    pub gas_used: U64,
    pub success: bool,
    pub vm_status: String,
    pub changes: Vec<WriteSetChange>,
    pub events: Vec<Event>,
    pub payload: TransactionPayload,
    #[serde(default)]
    pub state_checkpoint_hash: Option<HashValue>,
}

impl TransactionInfo for GenesisTransaction {
    fn hash(&self) -> &HashValue {
        &self.hash
    }
    fn success(&self) -> Option<bool> {
        Some(self.success)
    }
    fn version(&self) -> Option<u64> {
        Some(self.version.0)
    }
}

/// The consensus-inserted transaction that opens each block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMetadataTransaction {
    pub id: HashValue,
    pub epoch: U64,
    pub round: U64,
    pub previous_block_votes_bitvec: Vec<u8>,
    pub proposer: AccountAddress,
    pub failed_proposer_indices: Vec<u32>,
    pub version: U64,
    pub hash: HashValue,
    pub accumulator_root_hash: HashValue,
    pub state_change_hash: HashValue,
    pub event_root_hash: HashValue,
    pub gas_used: U64,
    pub success: bool,
    pub vm_status: String,
    pub changes: Vec<WriteSetChange>,
    pub events: Vec<Event>,
    pub timestamp: U64,
    #[serde(default)]
    pub state_checkpoint_hash: Option<HashValue>,
}

impl TransactionInfo for BlockMetadataTransaction {
    fn hash(&self) -> &HashValue {
        &self.hash
    }
    fn success(&self) -> Option<bool> {
        Some(self.success)
    }
    fn version(&self) -> Option<u64> {
        Some(self.version.0)
    }
}

/// The checkpoint transaction that closes each block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCheckpointTransaction {
    pub version: U64,
    pub hash: HashValue,
    pub accumulator_root_hash: HashValue,
    pub state_change_hash: HashValue,
    pub event_root_hash: HashValue,
    pub gas_used: U64,
    pub success: bool,
    pub vm_status: String,
    pub changes: Vec<WriteSetChange>,
    pub timestamp: U64,
    #[serde(default)]
    pub state_checkpoint_hash: Option<HashValue>,
}

impl TransactionInfo for StateCheckpointTransaction {
    fn hash(&self) -> &HashValue {
        &self.hash
    }
    fn success(&self) -> Option<bool> {
        Some(self.success)
    }
    fn version(&self) -> Option<u64> {
        Some(self.version.0)
    }
}

/// A validator-set-originated transaction (e.g. DKG results).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorTransaction {
    pub version: U64,
    pub hash: HashValue,
    pub accumulator_root_hash: HashValue,
    pub state_change_hash: HashValue,
    pub event_root_hash: HashValue,
    pub gas_used: U64,
    pub success: bool,
    pub vm_status: String,
    pub changes: Vec<WriteSetChange>,
    pub events: Vec<Event>,
    pub timestamp: U64,
    #[serde(default)]
    pub state_checkpoint_hash: Option<HashValue>,
}

impl TransactionInfo for ValidatorTransaction {
    fn hash(&self) -> &HashValue {
        &self.hash
    }
    fn success(&self) -> Option<bool> {
        Some(self.success)
    }
    fn version(&self) -> Option<u64> {
        Some(self.version.0)
    }
}

/// The node's acknowledgment of a submitted transaction. Shaped like a
/// pending transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    pub hash: HashValue,
    pub sender: AccountAddress,
    pub sequence_number: U64,
    pub max_gas_amount: U64,
    pub gas_unit_price: U64,
    pub expiration_timestamp_secs: U64,
    pub payload: TransactionPayload,
    #[serde(default)]
    pub signature: Option<TransactionSignature>,
}
