//! # Transaction Shapes
//!
//! A transition moves through three shapes:
//!
//! ```text
//! ProposedTransaction ──sign──→ SignedTransaction ──notarize──→ FinalizedTransaction
//! ```
//!
//! The proposed shape is what the validation engine verifies; its canonical
//! digest becomes the transaction id, and every signature (participants and
//! notary alike) is over that digest.

use crate::commands::Command;
use crate::records::{LedgerRecord, RecordKind};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_crypto::{canonical_digest, verify_signature, CryptoError};
use shared_types::{PublicKey, RecordRef, Signature, Timestamp, TxId};
use std::collections::{BTreeMap, BTreeSet};

/// A resolved record version: the concrete reference plus its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Where this version came from.
    pub reference: RecordRef,
    /// The version's contents.
    pub record: LedgerRecord,
}

/// A proposed transition: versions to consume, versions to read, records to
/// create, and the commands naming what is happening.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProposedTransaction {
    /// Record versions consumed by this transition.
    pub inputs: Vec<RecordEntry>,
    /// Record versions read but not consumed.
    pub references: Vec<RecordEntry>,
    /// Records created by this transition.
    pub outputs: Vec<LedgerRecord>,
    /// The intended transitions, each with its required signers.
    pub commands: Vec<Command>,
}

impl ProposedTransaction {
    /// The canonical digest of this proposal; doubles as the transaction id.
    pub fn digest(&self) -> Result<TxId, CryptoError> {
        canonical_digest(self)
    }

    /// Union of every command's required signer keys.
    pub fn required_signers(&self) -> BTreeSet<PublicKey> {
        self.commands
            .iter()
            .flat_map(|c| c.signers.iter().copied())
            .collect()
    }

    /// Consumed inputs of one record kind.
    pub fn inputs_of(&self, kind: RecordKind) -> Vec<&RecordEntry> {
        self.inputs.iter().filter(|e| e.record.kind() == kind).collect()
    }

    /// Read-only references of one record kind.
    pub fn references_of(&self, kind: RecordKind) -> Vec<&RecordEntry> {
        self.references
            .iter()
            .filter(|e| e.record.kind() == kind)
            .collect()
    }

    /// Created outputs of one record kind.
    pub fn outputs_of(&self, kind: RecordKind) -> Vec<&LedgerRecord> {
        self.outputs.iter().filter(|r| r.kind() == kind).collect()
    }

    /// Keys of every participant on every input and output.
    pub fn participant_keys(&self) -> BTreeSet<PublicKey> {
        self.inputs
            .iter()
            .map(|e| &e.record)
            .chain(self.outputs.iter())
            .flat_map(|r| r.participant_keys())
            .collect()
    }
}

/// A proposal plus the signatures collected so far.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The proposal being signed.
    pub content: ProposedTransaction,
    /// Digest of `content` at signing time.
    pub id: TxId,
    /// Signatures over `id`, keyed by signer.
    #[serde_as(as = "BTreeMap<_, Bytes>")]
    pub signatures: BTreeMap<PublicKey, Signature>,
}

impl SignedTransaction {
    /// Freeze a proposal: compute its digest, ready for signatures.
    pub fn new(content: ProposedTransaction) -> Result<Self, CryptoError> {
        let id = content.digest()?;
        Ok(Self {
            content,
            id,
            signatures: BTreeMap::new(),
        })
    }

    /// Attach one signer's signature.
    pub fn attach(&mut self, key: PublicKey, signature: Signature) {
        self.signatures.insert(key, signature);
    }

    /// Required signers that have not signed yet.
    pub fn missing_signers(&self) -> BTreeSet<PublicKey> {
        self.content
            .required_signers()
            .into_iter()
            .filter(|key| !self.signatures.contains_key(key))
            .collect()
    }

    /// Whether every required signer has signed.
    pub fn fully_signed(&self) -> bool {
        self.missing_signers().is_empty()
    }

    /// Check that the stored id still matches the content digest.
    pub fn digest_matches(&self) -> Result<bool, CryptoError> {
        Ok(self.content.digest()? == self.id)
    }

    /// Cryptographically verify every attached signature against `id`.
    pub fn verify_signatures(&self) -> Result<(), CryptoError> {
        for (key, signature) in &self.signatures {
            verify_signature(key, &self.id, signature)?;
        }
        Ok(())
    }

    /// References to this transaction's outputs, as successor versions.
    pub fn output_refs(&self) -> Vec<RecordRef> {
        (0..self.content.outputs.len() as u32)
            .map(|index| RecordRef::new(self.id, index))
            .collect()
    }
}

/// The notary's commitment: its signature over the transaction id and the
/// commit timestamp it assigned.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotarySeal {
    /// The notary's signing key.
    pub notary: PublicKey,
    /// Signature over `id || timestamp`.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
    /// Commit time, milliseconds since the UNIX epoch.
    pub timestamp: Timestamp,
}

impl NotarySeal {
    /// The exact bytes the notary signs.
    pub fn signed_bytes(id: &TxId, timestamp: Timestamp) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(40);
        bytes.extend_from_slice(id);
        bytes.extend_from_slice(&timestamp.to_le_bytes());
        bytes
    }

    /// Verify this seal over a transaction id.
    pub fn verify(&self, id: &TxId) -> Result<(), CryptoError> {
        verify_signature(
            &self.notary,
            &Self::signed_bytes(id, self.timestamp),
            &self.signature,
        )
    }
}

/// A committed, immutable transaction: fully signed and notarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedTransaction {
    /// The fully signed transaction.
    pub transaction: SignedTransaction,
    /// The notary's commitment.
    pub seal: NotarySeal,
}

impl FinalizedTransaction {
    /// The transaction id.
    pub fn id(&self) -> TxId {
        self.transaction.id
    }
}
