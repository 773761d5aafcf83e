//! Raw transaction signing.
//!
//! A [`RawTransaction`] is the signable subset of a user transaction. Its
//! canonical binary form is prefixed with a domain-separation digest before
//! signing, so raw-transaction signatures cannot be replayed as signatures
//! over any other structure.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::address::AccountAddress;
use crate::crypto::{AccountAuthenticator, Signer};
use crate::error::SigningError;
use crate::hash::HashValue;

/// Domain-separation salt hashed into every raw-transaction signing message.
pub const RAW_TRANSACTION_SALT: &[u8] = b"OPAL::RawTransaction";

/// The fields a sender commits to when signing a transaction.
///
/// The payload is carried as pre-encoded canonical bytes; its substructure
/// is not this type's concern.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: Vec<u8>,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

impl RawTransaction {
    /// The exact bytes a signer commits to:
    /// `SHA3-256(RAW_TRANSACTION_SALT) || canonical_bytes(self)`.
    pub fn signing_message(&self) -> Result<Vec<u8>, SigningError> {
        let body = borsh::to_vec(self).map_err(|e| SigningError::Serialization(e.to_string()))?;
        let prefix = HashValue::sha3_256(RAW_TRANSACTION_SALT);
        let mut msg = Vec::with_capacity(prefix.0.len() + body.len());
        msg.extend_from_slice(prefix.as_slice());
        msg.extend_from_slice(&body);
        Ok(msg)
    }

    /// Sign with any account signer, attaching the resulting authenticator.
    pub fn sign<S: Signer>(&self, signer: &S) -> Result<SignedTransaction, SigningError>
    where
        S::KeyType: crate::crypto::PublicKey,
    {
        let msg = self.signing_message()?;
        let authenticator = signer.sign(&msg)?;
        Ok(SignedTransaction {
            raw: self.clone(),
            authenticator,
        })
    }
}

/// A raw transaction with its authenticator attached, ready for canonical
/// encoding and submission.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignedTransaction {
    pub raw: RawTransaction,
    pub authenticator: AccountAuthenticator,
}

impl SignedTransaction {
    /// Check the attached authenticator against the raw transaction's
    /// signing message.
    pub fn verify(&self) -> bool {
        match self.raw.signing_message() {
            Ok(msg) => self.authenticator.verify(&msg),
            Err(_) => false,
        }
    }
}
