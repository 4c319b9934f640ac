//! # In-Memory Vault
//!
//! One party's view of the ledger: the unconsumed record versions it has been
//! handed, plus the references it knows to be spent. A finalized transaction
//! is applied atomically under one lock.

use crate::ports::outbound::{
    DistributionError, FinalityDistributor, VaultError, VaultQuery,
};
use ac_01_record_catalog::records::RecordKind;
use ac_01_record_catalog::transaction::{FinalizedTransaction, RecordEntry};
use parking_lot::Mutex;
use shared_types::{LinearId, RecordRef};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct VaultInner {
    current: HashMap<RecordRef, ac_01_record_catalog::records::LedgerRecord>,
    consumed: HashSet<RecordRef>,
}

/// A single participant's record store.
pub struct InMemoryVault {
    name: String,
    inner: Mutex<VaultInner>,
}

impl InMemoryVault {
    /// An empty vault for a named participant.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(VaultInner::default()),
        }
    }

    /// Apply a finalized transaction: consume its inputs, store its outputs.
    pub fn apply(&self, finalized: &FinalizedTransaction) {
        let mut inner = self.inner.lock();
        for input in &finalized.transaction.content.inputs {
            inner.current.remove(&input.reference);
            inner.consumed.insert(input.reference);
        }
        for (index, record) in finalized.transaction.content.outputs.iter().enumerate() {
            let reference = RecordRef::new(finalized.id(), index as u32);
            inner.current.insert(reference, record.clone());
        }
        debug!(
            vault = %self.name,
            id = ?finalized.id(),
            "applied finalized transaction"
        );
    }

    /// Seed an entry directly, bypassing the protocol. Test fixture only.
    pub fn install(&self, entry: RecordEntry) {
        self.inner.lock().current.insert(entry.reference, entry.record);
    }

    /// Number of unconsumed record versions held.
    pub fn current_count(&self) -> usize {
        self.inner.lock().current.len()
    }

    /// Whether a reference is known to be spent.
    pub fn is_consumed(&self, reference: &RecordRef) -> bool {
        self.inner.lock().consumed.contains(reference)
    }
}

#[async_trait::async_trait]
impl VaultQuery for InMemoryVault {
    async fn find_current(
        &self,
        kind: RecordKind,
        linear_id: &LinearId,
    ) -> Result<Vec<RecordEntry>, VaultError> {
        let inner = self.inner.lock();
        let mut matches: Vec<RecordEntry> = inner
            .current
            .iter()
            .filter(|(_, record)| record.kind() == kind && record.linear_id() == *linear_id)
            .map(|(reference, record)| RecordEntry {
                reference: *reference,
                record: record.clone(),
            })
            .collect();
        // Deterministic order; at most one entry per lineage when the vault
        // invariant holds.
        matches.sort_by_key(|entry| entry.reference);
        Ok(matches)
    }
}

/// Hands every finalized transaction to a fixed set of participant vaults.
pub struct VaultDistributor {
    vaults: Vec<Arc<InMemoryVault>>,
}

impl VaultDistributor {
    /// Distribute to these vaults.
    pub fn new(vaults: Vec<Arc<InMemoryVault>>) -> Self {
        Self { vaults }
    }
}

#[async_trait::async_trait]
impl FinalityDistributor for VaultDistributor {
    async fn distribute(
        &self,
        transaction: &FinalizedTransaction,
    ) -> Result<(), DistributionError> {
        for vault in &self.vaults {
            vault.apply(transaction);
        }
        Ok(())
    }
}
