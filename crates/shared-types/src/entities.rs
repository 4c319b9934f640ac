//! # Core Primitives
//!
//! The identity and reference types every other crate builds on.
//!
//! ## Clusters
//!
//! - **Identity**: `Party`, `PublicKey`, `Signature`
//! - **Lineage**: `LinearId` (stable across record versions)
//! - **Versions**: `TxId`, `RecordRef` (one concrete record version)

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte transaction digest, used as the transaction identifier.
pub type TxId = [u8; 32];

/// Milliseconds since the UNIX epoch.
pub type Timestamp = u64;

/// A signing identity participating in the ledger.
///
/// Two parties are the same entity exactly when both the display name and the
/// key agree; distinguished roles on a record (lender/borrower) compare whole
/// parties, not just keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    /// Human-readable legal name.
    pub name: String,
    /// The party's signing key.
    pub key: PublicKey,
}

impl Party {
    /// Create a party from a name and a signing key.
    pub fn new(name: impl Into<String>, key: PublicKey) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Identity of a record lineage, stable across successive versions.
///
/// Every update consumes the current version and produces a successor carrying
/// the same `LinearId`; exactly one version of a lineage is current at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LinearId(pub Uuid);

impl LinearId {
    /// Mint a fresh lineage identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinearId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LinearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to one concrete record version: the transaction that produced it
/// and the output slot it occupies there.
///
/// This is the unit the notary tracks for single consumption.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RecordRef {
    /// The producing transaction.
    pub txn: TxId,
    /// Output index within that transaction.
    pub index: u32,
}

impl RecordRef {
    /// Reference output `index` of transaction `txn`.
    pub fn new(txn: TxId, index: u32) -> Self {
        Self { txn, index }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex_prefix(&self.txn), self.index)
    }
}

fn hex_prefix(id: &TxId) -> String {
    id.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
