//! # Canonical Digests
//!
//! SHA-256 over the bincode encoding of a value. The digest of a proposed
//! transaction is its identity: parties sign it, the notary seals it, and
//! record references point back at it.

use crate::CryptoError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use shared_types::TxId;

/// SHA-256 of raw bytes.
pub fn sha256(bytes: &[u8]) -> TxId {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Digest of a value's canonical (bincode) encoding.
///
/// Field order is fixed by the type definition and map/set fields must use
/// ordered collections, so equal values always produce equal digests.
pub fn canonical_digest<T: Serialize>(value: &T) -> Result<TxId, CryptoError> {
    let bytes = bincode::serialize(value).map_err(|e| CryptoError::Encoding(e.to_string()))?;
    Ok(sha256(&bytes))
}
