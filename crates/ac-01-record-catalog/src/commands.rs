//! # Commands
//!
//! Closed, per-kind transition names. A command names the intended transition
//! and carries the keys whose signatures the transition requires. Adding a
//! variant here forces every dispatch site to handle it; there is no default
//! branch anywhere.

use serde::{Deserialize, Serialize};
use shared_types::PublicKey;
use std::collections::BTreeSet;

/// Transitions defined for obligation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObligationCommand {
    /// Issue a new obligation onto the ledger.
    Create,
    /// Replace the current version with one carrying a different value.
    UpdateValue,
    /// Replace the current version with one flagged as settled.
    MarkPaid,
}

/// Transitions defined for receipt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptCommand {
    /// Issue a settlement receipt, normally jointly with `MarkPaid`.
    Create,
}

/// Transitions defined for annotation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationCommand {
    /// Attach an annotation to another record's current version.
    Create,
}

/// Any command, tagged by the record kind it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Obligation(ObligationCommand),
    Receipt(ReceiptCommand),
    Annotation(AnnotationCommand),
}

impl CommandKind {
    /// Stable dotted name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Obligation(ObligationCommand::Create) => "obligation.create",
            CommandKind::Obligation(ObligationCommand::UpdateValue) => "obligation.update-value",
            CommandKind::Obligation(ObligationCommand::MarkPaid) => "obligation.mark-paid",
            CommandKind::Receipt(ReceiptCommand::Create) => "receipt.create",
            CommandKind::Annotation(AnnotationCommand::Create) => "annotation.create",
        }
    }
}

/// A command instance inside a transaction: the transition name plus the set
/// of keys that must sign the transaction for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Which transition is intended.
    pub kind: CommandKind,
    /// Keys required to sign for this command.
    pub signers: BTreeSet<PublicKey>,
}

impl Command {
    /// Build a command requiring `signers`.
    pub fn new(kind: CommandKind, signers: impl IntoIterator<Item = PublicKey>) -> Self {
        Self {
            kind,
            signers: signers.into_iter().collect(),
        }
    }
}
