//! # Record Kinds
//!
//! The closed set of ledger record shapes. A record version is immutable;
//! evolution happens by consuming the current version and producing a
//! successor under the same `LinearId`.

use serde::{Deserialize, Serialize};
use shared_types::{LinearId, Party, PublicKey};
use std::collections::BTreeSet;

/// Discriminant for the closed set of record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A debt instrument between a lender and a borrower.
    Obligation,
    /// Settlement receipt derived from an obligation.
    Receipt,
    /// Free-form annotation referencing another record without consuming it.
    Annotation,
}

impl RecordKind {
    /// Stable lowercase name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Obligation => "obligation",
            RecordKind::Receipt => "receipt",
            RecordKind::Annotation => "annotation",
        }
    }
}

/// A debt instrument. The single mutable fields are `value` (via UpdateValue)
/// and `paid` (via MarkPaid); everything else is fixed for the lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationRecord {
    /// Amount owed. Must stay strictly positive through every transition.
    pub value: i64,
    /// Whether the obligation has been settled.
    pub paid: bool,
    /// The party owed.
    pub lender: Party,
    /// The party owing.
    pub borrower: Party,
    /// Lineage identity, stable across versions.
    pub linear_id: LinearId,
}

impl ObligationRecord {
    /// A fresh, unpaid obligation with a new lineage.
    pub fn issue(value: i64, lender: Party, borrower: Party) -> Self {
        Self {
            value,
            paid: false,
            lender,
            borrower,
            linear_id: LinearId::new(),
        }
    }

    /// Successor version with a new value; lineage and every other field kept.
    pub fn with_value(&self, value: i64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Successor version marked settled.
    pub fn marked_paid(&self) -> Self {
        Self {
            paid: true,
            ..self.clone()
        }
    }
}

/// Proof of settlement, created jointly with marking its obligation paid.
/// Back-references the origin lineage rather than copying its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Lineage of the settled obligation.
    pub obligation_id: LinearId,
    /// Inherited from the settled obligation.
    pub lender: Party,
    /// Inherited from the settled obligation.
    pub borrower: Party,
    /// This receipt's own lineage identity.
    pub linear_id: LinearId,
}

/// A note attached to another record's lineage. The referenced record is read,
/// never consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Lineage of the record being annotated.
    pub ref_id: LinearId,
    /// Kind of the record being annotated.
    pub ref_kind: RecordKind,
    /// Free-form description.
    pub description: String,
    /// The annotating party.
    pub lender: Party,
    /// The party the annotation is shared with.
    pub borrower: Party,
    /// This annotation's own lineage identity.
    pub linear_id: LinearId,
}

/// Any record the ledger can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerRecord {
    Obligation(ObligationRecord),
    Receipt(ReceiptRecord),
    Annotation(AnnotationRecord),
}

impl LedgerRecord {
    /// The record's kind discriminant.
    pub fn kind(&self) -> RecordKind {
        match self {
            LedgerRecord::Obligation(_) => RecordKind::Obligation,
            LedgerRecord::Receipt(_) => RecordKind::Receipt,
            LedgerRecord::Annotation(_) => RecordKind::Annotation,
        }
    }

    /// The record's lineage identity.
    pub fn linear_id(&self) -> LinearId {
        match self {
            LedgerRecord::Obligation(r) => r.linear_id,
            LedgerRecord::Receipt(r) => r.linear_id,
            LedgerRecord::Annotation(r) => r.linear_id,
        }
    }

    /// The parties involved in this record.
    pub fn participants(&self) -> Vec<&Party> {
        match self {
            LedgerRecord::Obligation(r) => vec![&r.lender, &r.borrower],
            LedgerRecord::Receipt(r) => vec![&r.lender, &r.borrower],
            LedgerRecord::Annotation(r) => vec![&r.lender, &r.borrower],
        }
    }

    /// The participants' signing keys.
    pub fn participant_keys(&self) -> BTreeSet<PublicKey> {
        self.participants().into_iter().map(|p| p.key).collect()
    }

    /// Borrow as an obligation, if that is this record's kind.
    pub fn as_obligation(&self) -> Option<&ObligationRecord> {
        match self {
            LedgerRecord::Obligation(r) => Some(r),
            _ => None,
        }
    }

    /// Borrow as a receipt, if that is this record's kind.
    pub fn as_receipt(&self) -> Option<&ReceiptRecord> {
        match self {
            LedgerRecord::Receipt(r) => Some(r),
            _ => None,
        }
    }

    /// Borrow as an annotation, if that is this record's kind.
    pub fn as_annotation(&self) -> Option<&AnnotationRecord> {
        match self {
            LedgerRecord::Annotation(r) => Some(r),
            _ => None,
        }
    }
}
