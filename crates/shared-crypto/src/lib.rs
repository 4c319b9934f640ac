//! # Shared Crypto
//!
//! Ed25519 signing and canonical transaction digests for Accord.
//!
//! Parties and the notary sign the 32-byte digest of a proposed transaction;
//! the digest doubles as the transaction identifier. Key material is kept in
//! raw byte form in `shared-types`; this crate owns every operation on it.

pub mod digest;
pub mod signing;

pub use digest::{canonical_digest, sha256};
pub use signing::{verify_signature, SigningKeys};

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The public key bytes do not decode to a valid curve point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature verification failed.
    #[error("Signature verification failed")]
    VerificationFailed,

    /// The value could not be canonically encoded for digesting.
    #[error("Canonical encoding failed: {0}")]
    Encoding(String),
}
