//! Single-key Ed25519 scheme.

use std::fmt;

use borsh::io;
use borsh::{BorshDeserialize, BorshSerialize};
use ed25519_dalek::Signer as _;
use rand::rngs::OsRng;

use crate::error::{DecodeError, SigningError};

use super::authenticator::AccountAuthenticator;
use super::{CryptoMaterial, MessageSigner, PublicKey, Scheme, SignatureMaterial, Signer, VerifyingKey};

/// Ed25519 private key length in bytes.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;
/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

// ==============================================================================
// Private key
// ==============================================================================

/// Private key for signing. Generated from OS entropy; never leaves the
/// process through this crate's serialization paths.
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    key: ed25519_dalek::SigningKey,
}

impl Ed25519PrivateKey {
    /// Generate a fresh random key from OS-provided entropy.
    pub fn generate() -> Self {
        Self {
            key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    /// Derive the corresponding public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            key: self.key.verifying_key(),
        }
    }
}

impl CryptoMaterial for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.key.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let arr: [u8; ED25519_PRIVATE_KEY_LENGTH] =
            bytes.try_into().map_err(|_| DecodeError::WrongLength {
                material: "ed25519 private key",
                expected: ED25519_PRIVATE_KEY_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self {
            key: ed25519_dalek::SigningKey::from_bytes(&arr),
        })
    }
}

impl MessageSigner for Ed25519PrivateKey {
    type KeyType = Ed25519PublicKey;

    fn sign_message(&self, msg: &[u8]) -> Result<Ed25519Signature, SigningError> {
        Ok(Ed25519Signature {
            sig: self.key.sign(msg),
        })
    }

    fn verifying_key(&self) -> Ed25519PublicKey {
        self.public_key()
    }
}

impl Signer for Ed25519PrivateKey {
    fn sign(&self, msg: &[u8]) -> Result<AccountAuthenticator, SigningError> {
        Ok(AccountAuthenticator::Ed25519 {
            public_key: self.public_key(),
            signature: self.sign_message(msg)?,
        })
    }
}

impl PartialEq for Ed25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.key.to_bytes() == other.key.to_bytes()
    }
}

impl Eq for Ed25519PrivateKey {}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.write_str("Ed25519PrivateKey(..)")
    }
}

// ==============================================================================
// Public key
// ==============================================================================

/// Public key for signature verification and address derivation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    key: ed25519_dalek::VerifyingKey,
}

impl CryptoMaterial for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.key.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let arr: [u8; ED25519_PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| DecodeError::WrongLength {
                material: "ed25519 public key",
                expected: ED25519_PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            })?;
        ed25519_dalek::VerifyingKey::from_bytes(&arr)
            .map(|key| Self { key })
            .map_err(|e| DecodeError::InvalidMaterial {
                material: "ed25519 public key",
                reason: e.to_string(),
            })
    }
}

impl VerifyingKey for Ed25519PublicKey {
    type SignatureType = Ed25519Signature;

    fn verify(&self, msg: &[u8], signature: &Ed25519Signature) -> bool {
        self.key.verify_strict(msg, &signature.sig).is_ok()
    }
}

impl PublicKey for Ed25519PublicKey {
    fn scheme(&self) -> Scheme {
        Scheme::Ed25519
    }
}

impl BorshSerialize for Ed25519PublicKey {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.key.to_bytes().serialize(writer)
    }
}

impl BorshDeserialize for Ed25519PublicKey {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let bytes = <[u8; ED25519_PUBLIC_KEY_LENGTH]>::deserialize_reader(reader)?;
        ed25519_dalek::VerifyingKey::from_bytes(&bytes)
            .map(|key| Self { key })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ==============================================================================
// Signature
// ==============================================================================

/// An Ed25519 signature, 64 bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature {
    sig: ed25519_dalek::Signature,
}

impl CryptoMaterial for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.sig.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let arr: [u8; ED25519_SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| DecodeError::WrongLength {
                material: "ed25519 signature",
                expected: ED25519_SIGNATURE_LENGTH,
                actual: bytes.len(),
            })?;
        // Point validity is checked at verification time; any 64-byte buffer
        // is a structurally valid signature.
        Ok(Self {
            sig: ed25519_dalek::Signature::from_bytes(&arr),
        })
    }
}

impl SignatureMaterial for Ed25519Signature {}

impl BorshSerialize for Ed25519Signature {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.sig.to_bytes().serialize(writer)
    }
}

impl BorshDeserialize for Ed25519Signature {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let bytes = <[u8; ED25519_SIGNATURE_LENGTH]>::deserialize_reader(reader)?;
        Ok(Self {
            sig: ed25519_dalek::Signature::from_bytes(&bytes),
        })
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({})", self.to_hex())
    }
}
