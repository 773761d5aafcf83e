//! Cryptographic material: keys, signatures, and the signing contract.
//!
//! Every concrete scheme participates through the same trait stack:
//! [`CryptoMaterial`] gives stable byte/hex forms, [`VerifyingKey`] adds
//! verification, [`PublicKey`] adds on-chain identity (scheme + derived
//! authentication key), and [`Signer`] / [`MessageSigner`] produce
//! signatures. The stack never assumes a fixed key length, so multi-key
//! threshold schemes fit behind the same contract as single keys.

pub mod authenticator;
pub mod ed25519;
pub mod multi_ed25519;

pub use authenticator::AccountAuthenticator;
pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};
pub use multi_ed25519::{MultiEd25519PrivateKey, MultiEd25519PublicKey, MultiEd25519Signature};

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use sha3::{Digest, Sha3_256};

use crate::address::AccountAddress;
use crate::error::{DecodeError, SigningError};
use crate::hex;

// ==============================================================================
// Capability traits
// ==============================================================================

/// Stable byte and hex (de)serialization for keys and signatures.
///
/// `from_bytes` is length-checked: wrong-length input fails at construction,
/// never silently truncates or pads.
pub trait CryptoMaterial: Sized {
    /// The raw canonical byte form.
    fn to_bytes(&self) -> Vec<u8>;

    /// Reconstruct from the raw byte form produced by [`to_bytes`].
    ///
    /// [`to_bytes`]: CryptoMaterial::to_bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;

    /// The `0x`-prefixed lowercase hex form of [`CryptoMaterial::to_bytes`].
    fn to_hex(&self) -> String {
        hex::to_hex(&self.to_bytes())
    }

    /// Parse from hex, with or without a leading `0x`.
    fn from_hex(s: &str) -> Result<Self, DecodeError> {
        Self::from_bytes(&hex::from_hex(s)?)
    }
}

/// A signature value with a canonical binary form.
pub trait SignatureMaterial: CryptoMaterial + BorshSerialize + BorshDeserialize {}

/// A key that can verify signatures of its scheme.
///
/// Not every verifying key can stand on its own as an account key; see
/// [`PublicKey`] for the ones that can.
pub trait VerifyingKey: CryptoMaterial + BorshSerialize + BorshDeserialize {
    type SignatureType: SignatureMaterial;

    /// Verify `signature` over `msg`. Never errors: any mismatch, malformed
    /// signature, or wrong-scheme pairing simply returns `false`.
    fn verify(&self, msg: &[u8], signature: &Self::SignatureType) -> bool;
}

/// A verifying key that is directly usable for on-chain authentication.
pub trait PublicKey: VerifyingKey {
    /// The derivation scheme this key uses.
    fn scheme(&self) -> Scheme;

    /// Derive the authentication key. The scheme discriminant participates
    /// in the hash input, so byte-identical keys of different schemes never
    /// collide.
    fn auth_key(&self) -> AuthenticationKey {
        AuthenticationKey::from_public_key_bytes(&self.to_bytes(), self.scheme())
    }
}

/// Raw signing without identity binding.
///
/// Used where a private key is not itself a full account signer, e.g. one
/// participant key inside a threshold scheme.
pub trait MessageSigner {
    type KeyType: VerifyingKey;

    /// Sign `msg`, returning the bare signature with no key attached.
    fn sign_message(
        &self,
        msg: &[u8],
    ) -> Result<<Self::KeyType as VerifyingKey>::SignatureType, SigningError>;

    /// The key that verifies signatures from this signer.
    fn verifying_key(&self) -> Self::KeyType;
}

/// An account-level signer: produces authenticators a verifier can check
/// against an on-chain account without out-of-band key lookup.
pub trait Signer: MessageSigner
where
    Self::KeyType: PublicKey,
{
    /// Sign `msg` and bundle the signature with its verifying key metadata.
    fn sign(&self, msg: &[u8]) -> Result<AccountAuthenticator, SigningError>;

    /// The account public key for this signer.
    fn public_key(&self) -> Self::KeyType {
        self.verifying_key()
    }

    /// The authentication key for this signer's account.
    fn auth_key(&self) -> AuthenticationKey {
        self.public_key().auth_key()
    }
}

// ==============================================================================
// Scheme and authentication key
// ==============================================================================

/// Identifies the algorithm / derivation rule of a key. The numeric value
/// is the byte appended to key bytes during authentication-key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Scheme {
    Ed25519 = 0,
    MultiEd25519 = 1,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => f.write_str("ed25519"),
            Self::MultiEd25519 => f.write_str("multi_ed25519"),
        }
    }
}

/// Address-like value deterministically derived from a public key and its
/// scheme: `SHA3-256(key_bytes || scheme_byte)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct AuthenticationKey(pub [u8; 32]);

impl AuthenticationKey {
    pub fn from_public_key_bytes(key_bytes: &[u8], scheme: Scheme) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(key_bytes);
        hasher.update([scheme as u8]);
        Self(hasher.finalize().into())
    }

    /// The account address owned by this authentication key.
    pub fn derived_address(&self) -> AccountAddress {
        AccountAddress(self.0)
    }
}

impl CryptoMaterial for AuthenticationKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| DecodeError::WrongLength {
            material: "authentication key",
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for AuthenticationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AuthenticationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthenticationKey({})", self.to_hex())
    }
}
