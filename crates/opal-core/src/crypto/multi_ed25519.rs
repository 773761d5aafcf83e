//! K-of-N threshold Ed25519 scheme.
//!
//! A multi-ed25519 account is governed by up to 32 sub-keys and a signing
//! threshold K. A signature carries one sub-signature per participating key
//! plus a 4-byte bitmap (MSB-first) recording which key indices signed.
//! Sub-keys participate through the [`MessageSigner`] capability only; they
//! are not standalone account signers here.

use borsh::io;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::{DecodeError, SigningError};

use super::authenticator::AccountAuthenticator;
use super::ed25519::{
    Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, ED25519_PUBLIC_KEY_LENGTH,
    ED25519_SIGNATURE_LENGTH,
};
use super::{CryptoMaterial, MessageSigner, PublicKey, Scheme, SignatureMaterial, Signer, VerifyingKey};

/// Maximum number of sub-keys in one multi-ed25519 account.
pub const MAX_SUB_KEYS: usize = 32;
/// Signer bitmap length in bytes.
pub const BITMAP_LENGTH: usize = 4;

fn bitmap_bit(bitmap: &[u8; BITMAP_LENGTH], index: usize) -> bool {
    bitmap[index / 8] & (0x80 >> (index % 8)) != 0
}

// ==============================================================================
// Public key
// ==============================================================================

/// N sub-keys plus a threshold. Byte form: each 32-byte sub-key
/// concatenated, followed by the threshold byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiEd25519PublicKey {
    public_keys: Vec<Ed25519PublicKey>,
    threshold: u8,
}

impl MultiEd25519PublicKey {
    pub fn new(public_keys: Vec<Ed25519PublicKey>, threshold: u8) -> Result<Self, DecodeError> {
        let n = public_keys.len();
        if threshold == 0 {
            return Err(DecodeError::InvalidMaterial {
                material: "multi-ed25519 public key",
                reason: "threshold must be at least 1".to_string(),
            });
        }
        if n < threshold as usize {
            return Err(DecodeError::InvalidMaterial {
                material: "multi-ed25519 public key",
                reason: format!("threshold {threshold} exceeds key count {n}"),
            });
        }
        if n > MAX_SUB_KEYS {
            return Err(DecodeError::InvalidMaterial {
                material: "multi-ed25519 public key",
                reason: format!("{n} sub-keys exceeds the maximum of {MAX_SUB_KEYS}"),
            });
        }
        Ok(Self {
            public_keys,
            threshold,
        })
    }

    pub fn public_keys(&self) -> &[Ed25519PublicKey] {
        &self.public_keys
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl CryptoMaterial for MultiEd25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.public_keys.len() * ED25519_PUBLIC_KEY_LENGTH + 1);
        for key in &self.public_keys {
            out.extend_from_slice(&key.to_bytes());
        }
        out.push(self.threshold);
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() || (bytes.len() - 1) % ED25519_PUBLIC_KEY_LENGTH != 0 {
            return Err(DecodeError::InvalidMaterial {
                material: "multi-ed25519 public key",
                reason: format!(
                    "length {} is not a multiple of {} sub-key bytes plus a threshold byte",
                    bytes.len(),
                    ED25519_PUBLIC_KEY_LENGTH
                ),
            });
        }
        let (key_bytes, threshold) = bytes.split_at(bytes.len() - 1);
        let public_keys = key_bytes
            .chunks_exact(ED25519_PUBLIC_KEY_LENGTH)
            .map(Ed25519PublicKey::from_bytes)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(public_keys, threshold[0])
    }
}

impl VerifyingKey for MultiEd25519PublicKey {
    type SignatureType = MultiEd25519Signature;

    fn verify(&self, msg: &[u8], signature: &MultiEd25519Signature) -> bool {
        let indices = signature.signer_indices();
        if indices.len() != signature.signatures.len() {
            return false;
        }
        if indices.len() < self.threshold as usize {
            return false;
        }
        if indices.iter().any(|&i| i >= self.public_keys.len()) {
            return false;
        }
        indices
            .iter()
            .zip(&signature.signatures)
            .all(|(&i, sig)| self.public_keys[i].verify(msg, sig))
    }
}

impl PublicKey for MultiEd25519PublicKey {
    fn scheme(&self) -> Scheme {
        Scheme::MultiEd25519
    }
}

impl BorshSerialize for MultiEd25519PublicKey {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.to_bytes().serialize(writer)
    }
}

impl BorshDeserialize for MultiEd25519PublicKey {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let bytes = Vec::<u8>::deserialize_reader(reader)?;
        Self::from_bytes(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

// ==============================================================================
// Signature
// ==============================================================================

/// Sub-signatures in ascending key-index order plus the signer bitmap.
/// Byte form: each 64-byte sub-signature concatenated, then the 4 bitmap
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiEd25519Signature {
    signatures: Vec<Ed25519Signature>,
    bitmap: [u8; BITMAP_LENGTH],
}

impl MultiEd25519Signature {
    /// Assemble from `(key_index, signature)` pairs. Indices must be unique
    /// and below [`MAX_SUB_KEYS`]; pairs are reordered by index.
    pub fn new(mut parts: Vec<(u8, Ed25519Signature)>) -> Result<Self, SigningError> {
        parts.sort_by_key(|(index, _)| *index);
        let mut bitmap = [0u8; BITMAP_LENGTH];
        let mut signatures = Vec::with_capacity(parts.len());
        for (index, signature) in parts {
            let index = index as usize;
            if index >= MAX_SUB_KEYS {
                return Err(SigningError::SignerIndexOutOfRange {
                    index,
                    count: MAX_SUB_KEYS,
                });
            }
            if bitmap_bit(&bitmap, index) {
                return Err(SigningError::KeyMaterial(format!(
                    "duplicate signer index {index}"
                )));
            }
            bitmap[index / 8] |= 0x80 >> (index % 8);
            signatures.push(signature);
        }
        Ok(Self { signatures, bitmap })
    }

    /// Key indices with a set bitmap bit, ascending.
    pub fn signer_indices(&self) -> Vec<usize> {
        (0..MAX_SUB_KEYS)
            .filter(|&i| bitmap_bit(&self.bitmap, i))
            .collect()
    }

    pub fn signatures(&self) -> &[Ed25519Signature] {
        &self.signatures
    }

    pub fn bitmap(&self) -> &[u8; BITMAP_LENGTH] {
        &self.bitmap
    }
}

impl CryptoMaterial for MultiEd25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(self.signatures.len() * ED25519_SIGNATURE_LENGTH + BITMAP_LENGTH);
        for sig in &self.signatures {
            out.extend_from_slice(&sig.to_bytes());
        }
        out.extend_from_slice(&self.bitmap);
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < BITMAP_LENGTH || (bytes.len() - BITMAP_LENGTH) % ED25519_SIGNATURE_LENGTH != 0
        {
            return Err(DecodeError::InvalidMaterial {
                material: "multi-ed25519 signature",
                reason: format!(
                    "length {} is not a multiple of {} signature bytes plus a {}-byte bitmap",
                    bytes.len(),
                    ED25519_SIGNATURE_LENGTH,
                    BITMAP_LENGTH
                ),
            });
        }
        let (sig_bytes, bitmap_bytes) = bytes.split_at(bytes.len() - BITMAP_LENGTH);
        let signatures = sig_bytes
            .chunks_exact(ED25519_SIGNATURE_LENGTH)
            .map(Ed25519Signature::from_bytes)
            .collect::<Result<Vec<_>, _>>()?;
        let mut bitmap = [0u8; BITMAP_LENGTH];
        bitmap.copy_from_slice(bitmap_bytes);

        let set_bits = (0..MAX_SUB_KEYS).filter(|&i| bitmap_bit(&bitmap, i)).count();
        if set_bits != signatures.len() {
            return Err(DecodeError::InvalidMaterial {
                material: "multi-ed25519 signature",
                reason: format!(
                    "bitmap marks {set_bits} signers but {} signatures are present",
                    signatures.len()
                ),
            });
        }
        Ok(Self { signatures, bitmap })
    }
}

impl SignatureMaterial for MultiEd25519Signature {}

impl BorshSerialize for MultiEd25519Signature {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.to_bytes().serialize(writer)
    }
}

impl BorshDeserialize for MultiEd25519Signature {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let bytes = Vec::<u8>::deserialize_reader(reader)?;
        Self::from_bytes(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

// ==============================================================================
// Private key
// ==============================================================================

/// A participating subset of a multi-ed25519 account's sub-keys.
///
/// Holds the full public key plus `(index, key)` pairs for the sub-keys this
/// process controls. Signing fails with [`SigningError::NotEnoughSigners`]
/// when the subset is below the threshold.
#[derive(Clone)]
pub struct MultiEd25519PrivateKey {
    public_key: MultiEd25519PublicKey,
    signers: Vec<(u8, Ed25519PrivateKey)>,
}

impl MultiEd25519PrivateKey {
    pub fn new(
        public_key: MultiEd25519PublicKey,
        signers: Vec<(u8, Ed25519PrivateKey)>,
    ) -> Result<Self, SigningError> {
        let count = public_key.public_keys().len();
        for (index, _) in &signers {
            if *index as usize >= count {
                return Err(SigningError::SignerIndexOutOfRange {
                    index: *index as usize,
                    count,
                });
            }
        }
        Ok(Self {
            public_key,
            signers,
        })
    }

    /// Build an account from a full set of private keys, controlling every
    /// sub-key.
    pub fn from_private_keys(
        private_keys: Vec<Ed25519PrivateKey>,
        threshold: u8,
    ) -> Result<Self, DecodeError> {
        let public_keys = private_keys.iter().map(|k| k.public_key()).collect();
        let public_key = MultiEd25519PublicKey::new(public_keys, threshold)?;
        let signers = private_keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| (i as u8, key))
            .collect();
        Ok(Self {
            public_key,
            signers,
        })
    }
}

impl MessageSigner for MultiEd25519PrivateKey {
    type KeyType = MultiEd25519PublicKey;

    fn sign_message(&self, msg: &[u8]) -> Result<MultiEd25519Signature, SigningError> {
        let threshold = self.public_key.threshold() as usize;
        if self.signers.len() < threshold {
            return Err(SigningError::NotEnoughSigners {
                available: self.signers.len(),
                threshold,
            });
        }
        // Exactly threshold sub-signatures; extra controlled keys stay idle.
        let parts = self.signers[..threshold]
            .iter()
            .map(|(index, key)| Ok((*index, key.sign_message(msg)?)))
            .collect::<Result<Vec<_>, SigningError>>()?;
        MultiEd25519Signature::new(parts)
    }

    fn verifying_key(&self) -> MultiEd25519PublicKey {
        self.public_key.clone()
    }
}

impl Signer for MultiEd25519PrivateKey {
    fn sign(&self, msg: &[u8]) -> Result<AccountAuthenticator, SigningError> {
        Ok(AccountAuthenticator::MultiEd25519 {
            public_key: self.public_key.clone(),
            signature: self.sign_message(msg)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: usize, threshold: u8) -> MultiEd25519PrivateKey {
        let keys = (0..n).map(|_| Ed25519PrivateKey::generate()).collect();
        MultiEd25519PrivateKey::from_private_keys(keys, threshold).expect("valid account")
    }

    #[test]
    fn threshold_sign_verify() {
        let account = account(3, 2);
        let public = account.verifying_key();
        let signature = account.sign_message(b"proposal").expect("signing");
        assert!(public.verify(b"proposal", &signature));
        assert!(!public.verify(b"other", &signature));
    }

    #[test]
    fn below_threshold_subset_cannot_sign() {
        let full = account(3, 2);
        let public = full.verifying_key();
        let one_signer = vec![(0u8, Ed25519PrivateKey::generate())];
        let partial = MultiEd25519PrivateKey::new(public, one_signer).expect("valid subset");

        let err = partial.sign_message(b"msg").expect_err("below threshold");
        assert!(matches!(
            err,
            SigningError::NotEnoughSigners {
                available: 1,
                threshold: 2
            }
        ));
    }

    #[test]
    fn signer_index_out_of_range_fails_at_construction() {
        let full = account(2, 1);
        let public = full.verifying_key();
        let bad = vec![(5u8, Ed25519PrivateKey::generate())];
        assert!(matches!(
            MultiEd25519PrivateKey::new(public, bad),
            Err(SigningError::SignerIndexOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn public_key_bytes_round_trip() {
        let public = account(4, 3).verifying_key();
        let back = MultiEd25519PublicKey::from_bytes(&public.to_bytes()).expect("round trip");
        assert_eq!(back, public);
        assert_eq!(back.threshold(), 3);
        assert_eq!(back.public_keys().len(), 4);
    }

    #[test]
    fn public_key_rejects_truncated_bytes() {
        let bytes = account(2, 1).verifying_key().to_bytes();
        assert!(MultiEd25519PublicKey::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn public_key_rejects_zero_threshold() {
        let keys = vec![Ed25519PrivateKey::generate().public_key()];
        assert!(MultiEd25519PublicKey::new(keys, 0).is_err());
    }

    #[test]
    fn public_key_rejects_threshold_above_key_count() {
        let keys = vec![Ed25519PrivateKey::generate().public_key()];
        assert!(MultiEd25519PublicKey::new(keys, 2).is_err());
    }

    #[test]
    fn signature_bytes_round_trip() {
        let account = account(3, 2);
        let signature = account.sign_message(b"msg").expect("signing");
        let back = MultiEd25519Signature::from_bytes(&signature.to_bytes()).expect("round trip");
        assert_eq!(back, signature);
        assert!(account.verifying_key().verify(b"msg", &back));
    }

    #[test]
    fn signature_rejects_bitmap_count_mismatch() {
        let account = account(3, 2);
        let mut bytes = account.sign_message(b"msg").expect("signing").to_bytes();
        // Set an extra bitmap bit without adding a signature.
        let len = bytes.len();
        bytes[len - 1] |= 0x01;
        assert!(MultiEd25519Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn duplicate_signer_index_rejected() {
        let key = Ed25519PrivateKey::generate();
        let sig = key.sign_message(b"m").expect("signing");
        assert!(MultiEd25519Signature::new(vec![(0, sig), (0, sig)]).is_err());
    }

    #[test]
    fn wrong_account_signature_fails_verification() {
        let a = account(3, 2);
        let b = account(3, 2);
        let signature = a.sign_message(b"msg").expect("signing");
        assert!(!b.verifying_key().verify(b"msg", &signature));
    }

    #[test]
    fn authenticator_round_trip() {
        let account = account(2, 2);
        let authenticator = account.sign(b"payload").expect("signing");
        assert!(authenticator.verify(b"payload"));
    }
}
