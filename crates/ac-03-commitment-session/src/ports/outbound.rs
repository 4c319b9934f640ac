//! # Outbound Ports (Driven Ports)
//!
//! Traits for the collaborators this subsystem consumes but does not own:
//! the vault (current-state queries), the notary (global single-consumption
//! and commit timestamps), and the distribution of finalized transactions.
//! Implementations must be thread-safe (`Send + Sync`).

use ac_01_record_catalog::records::RecordKind;
use ac_01_record_catalog::transaction::{FinalizedTransaction, NotarySeal, RecordEntry, SignedTransaction};
use shared_types::{LinearId, TxId};
use thiserror::Error;

/// Error from vault queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    /// The caller expected a current version and none exists.
    #[error("no current {kind:?} record for lineage {linear_id}")]
    NotFound {
        kind: RecordKind,
        linear_id: LinearId,
    },

    /// More than one unconsumed version for one lineage. The vault's own
    /// invariant is broken; nothing sensible can be built on top of it.
    #[error("lineage {linear_id} has {count} unconsumed {kind:?} versions")]
    AmbiguousLineage {
        kind: RecordKind,
        linear_id: LinearId,
        count: usize,
    },

    /// The storage collaborator itself failed.
    #[error("vault backend error: {0}")]
    Backend(String),
}

/// Error from the notary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotaryError {
    /// An input was already consumed by another finalized transaction.
    #[error("input already consumed by transaction {conflicting:02x?}")]
    DoubleSpend {
        /// The finalized transaction that consumed the input first.
        conflicting: TxId,
    },

    /// The submitted transaction's signatures do not hold up.
    #[error("notary rejected signatures: {0}")]
    SignatureVerification(String),

    /// The notary could not be reached or answered malformed.
    #[error("notary unavailable: {0}")]
    Unavailable(String),
}

/// Error from handing a finalized transaction to participants' storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("distribution failed: {0}")]
pub struct DistributionError(pub String);

/// Read access to current (unconsumed) record versions.
#[async_trait::async_trait]
pub trait VaultQuery: Send + Sync {
    /// Every unconsumed version of `kind` under `linear_id`, oldest first.
    ///
    /// An empty page is not an error at this level; callers that expect
    /// exactly one version go through [`expect_single_current`].
    async fn find_current(
        &self,
        kind: RecordKind,
        linear_id: &LinearId,
    ) -> Result<Vec<RecordEntry>, VaultError>;
}

/// The external uniqueness and timestamping service.
#[async_trait::async_trait]
pub trait NotaryClient: Send + Sync {
    /// Commit a fully signed transaction.
    ///
    /// The notary checks that no consumed input was consumed before, then
    /// assigns a commit timestamp and signs. There is no partial commit: on
    /// any error, no input is recorded as consumed by this transaction.
    async fn commit(&self, transaction: &SignedTransaction) -> Result<NotarySeal, NotaryError>;
}

/// Hands a finalized transaction to every participant's storage collaborator.
#[async_trait::async_trait]
pub trait FinalityDistributor: Send + Sync {
    /// Persist `transaction` for every participant.
    async fn distribute(&self, transaction: &FinalizedTransaction) -> Result<(), DistributionError>;
}

/// Resolve the single current version of a lineage.
///
/// Zero versions map to [`VaultError::NotFound`]; more than one is the
/// vault-invariant breach [`VaultError::AmbiguousLineage`].
pub async fn expect_single_current<V: VaultQuery + ?Sized>(
    vault: &V,
    kind: RecordKind,
    linear_id: &LinearId,
) -> Result<RecordEntry, VaultError> {
    let mut page = vault.find_current(kind, linear_id).await?;
    match page.len() {
        0 => Err(VaultError::NotFound {
            kind,
            linear_id: *linear_id,
        }),
        1 => Ok(page.remove(0)),
        count => Err(VaultError::AmbiguousLineage {
            kind,
            linear_id: *linear_id,
            count,
        }),
    }
}
