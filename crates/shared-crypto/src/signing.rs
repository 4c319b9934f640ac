//! # Ed25519 Signing
//!
//! Deterministic-nonce Edwards curve signatures over transaction digests.

use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use shared_types::{PublicKey, Signature};
use zeroize::Zeroize;

/// A party's (or the notary's) signing key pair.
pub struct SigningKeys {
    signing_key: SigningKey,
}

impl SigningKeys {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Derive a key pair from a 32-byte seed.
    ///
    /// Deterministic; used by tests and fixtures that need stable identities.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// The public half, as raw bytes.
    pub fn public_key(&self) -> PublicKey {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message (normally a transaction digest).
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message).to_bytes()
    }
}

impl Drop for SigningKeys {
    fn drop(&mut self) {
        // Scrub secret key material
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}

/// Verify `signature` over `message` against a raw public key.
pub fn verify_signature(
    key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(key).map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::VerificationFailed)
}
