//! Core data model for the Opal chain SDK.
//!
//! Mediates between the full node's JSON API and the canonical binary
//! signing representation: typed transaction records decoded from tagged
//! JSON, strict quantity and hex codecs, and the cryptographic-material
//! layer used to sign and verify over the canonical bytes.

pub mod address;
pub mod api;
pub mod crypto;
pub mod error;
pub mod hash;
pub mod hex;
pub mod quantity;
pub mod txn;

pub use address::AccountAddress;
pub use api::{decode_transaction, Transaction, TransactionVariant};
pub use error::{DecodeError, NarrowingError, SigningError};
pub use hash::HashValue;
pub use quantity::{U128, U64};
