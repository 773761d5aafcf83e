//! Opaque nested values carried inside transaction records.
//!
//! Payloads, events, write-set changes, and the wire signature each have
//! deep substructure of their own, but this crate only needs them as codable
//! values that round-trip untouched. `#[serde(transparent)]` keeps the JSON
//! representation identical to what the node sent.

use serde::{Deserialize, Serialize};

/// The entry-function or script payload of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionPayload(pub serde_json::Value);

/// An event emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(pub serde_json::Value);

/// A single state change in a transaction's write set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteSetChange(pub serde_json::Value);

/// The signature block attached to a submitted transaction, as the node
/// reports it. Distinct from the crypto-material types: this is the JSON
/// echo, not a verifiable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionSignature(pub serde_json::Value);
