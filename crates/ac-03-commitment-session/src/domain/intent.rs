//! # Transaction Intents
//!
//! What a proposer wants to do, before current state is resolved. The
//! session turns an intent plus vault lookups into a concrete proposal.

use shared_types::{LinearId, Party};

/// A proposer's desired transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionIntent {
    /// Issue a new obligation; the proposer is the lender.
    CreateObligation {
        /// Amount owed. Must be strictly positive to pass verification.
        value: i64,
        /// The owing party.
        borrower: Party,
    },
    /// Replace the current version's value.
    UpdateValue {
        /// Lineage to amend.
        linear_id: LinearId,
        /// The replacement value.
        new_value: i64,
    },
    /// Mark the obligation settled and issue the matching receipt, jointly.
    SettleObligation {
        /// Lineage to settle.
        linear_id: LinearId,
    },
    /// Attach an annotation to the obligation's current version without
    /// consuming it; the proposer is the annotating party.
    AnnotateObligation {
        /// Lineage to annotate.
        linear_id: LinearId,
        /// Free-form note.
        description: String,
        /// The party the annotation is shared with.
        counterparty: Party,
    },
}

impl TransactionIntent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionIntent::CreateObligation { .. } => "create-obligation",
            TransactionIntent::UpdateValue { .. } => "update-value",
            TransactionIntent::SettleObligation { .. } => "settle-obligation",
            TransactionIntent::AnnotateObligation { .. } => "annotate-obligation",
        }
    }
}
