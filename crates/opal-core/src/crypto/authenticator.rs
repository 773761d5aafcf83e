//! Account authenticators: a signature bundled with the key metadata a
//! verifier needs to check it against an on-chain account.

use borsh::{BorshDeserialize, BorshSerialize};

use super::ed25519::{Ed25519PublicKey, Ed25519Signature};
use super::multi_ed25519::{MultiEd25519PublicKey, MultiEd25519Signature};
use super::{AuthenticationKey, PublicKey, Scheme, VerifyingKey};

/// One signature plus its verifying key, tagged by scheme.
///
/// Self-contained: [`verify`] needs no out-of-band key lookup, and
/// [`auth_key`] recovers the account identity the signature claims.
///
/// [`verify`]: AccountAuthenticator::verify
/// [`auth_key`]: AccountAuthenticator::auth_key
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum AccountAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
    MultiEd25519 {
        public_key: MultiEd25519PublicKey,
        signature: MultiEd25519Signature,
    },
}

impl AccountAuthenticator {
    /// Verify the contained signature over `msg` with the contained key.
    pub fn verify(&self, msg: &[u8]) -> bool {
        match self {
            Self::Ed25519 {
                public_key,
                signature,
            } => public_key.verify(msg, signature),
            Self::MultiEd25519 {
                public_key,
                signature,
            } => public_key.verify(msg, signature),
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Ed25519 { .. } => Scheme::Ed25519,
            Self::MultiEd25519 { .. } => Scheme::MultiEd25519,
        }
    }

    /// The authentication key of the account this authenticator claims.
    pub fn auth_key(&self) -> AuthenticationKey {
        match self {
            Self::Ed25519 { public_key, .. } => public_key.auth_key(),
            Self::MultiEd25519 { public_key, .. } => public_key.auth_key(),
        }
    }
}
