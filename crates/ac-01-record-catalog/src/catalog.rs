//! # Catalog Registry
//!
//! The closed table tying record kinds to the commands that may transition
//! them, and each command to the rule family that governs it. The validation
//! engine treats any command missing from this table as unrecognised and
//! rejects the whole transaction.

use crate::commands::{AnnotationCommand, CommandKind, ObligationCommand, ReceiptCommand};
use crate::records::RecordKind;

/// The shape of rule a command is verified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    /// Zero own-kind inputs, exactly one output, fresh lineage.
    Create,
    /// Exactly one own-kind input and output; a single numeric field changes.
    Update,
    /// Exactly one own-kind input and output; a single boolean flag changes.
    FlagToggle,
    /// Created alongside another kind's transition; back-references it.
    DerivativeCreate,
    /// Created against a read-only reference to another record.
    ReferenceCreate,
}

/// Every registered command, the kind it transitions, and its rule family.
const REGISTRY: &[(CommandKind, RecordKind, RuleFamily)] = &[
    (
        CommandKind::Obligation(ObligationCommand::Create),
        RecordKind::Obligation,
        RuleFamily::Create,
    ),
    (
        CommandKind::Obligation(ObligationCommand::UpdateValue),
        RecordKind::Obligation,
        RuleFamily::Update,
    ),
    (
        CommandKind::Obligation(ObligationCommand::MarkPaid),
        RecordKind::Obligation,
        RuleFamily::FlagToggle,
    ),
    (
        CommandKind::Receipt(ReceiptCommand::Create),
        RecordKind::Receipt,
        RuleFamily::DerivativeCreate,
    ),
    (
        CommandKind::Annotation(AnnotationCommand::Create),
        RecordKind::Annotation,
        RuleFamily::ReferenceCreate,
    ),
];

/// Whether a command kind is registered at all.
pub fn is_registered(kind: &CommandKind) -> bool {
    REGISTRY.iter().any(|(k, _, _)| k == kind)
}

/// The rule family governing a command, if it is registered.
pub fn rule_family(kind: &CommandKind) -> Option<RuleFamily> {
    REGISTRY
        .iter()
        .find(|(k, _, _)| k == kind)
        .map(|(_, _, family)| *family)
}

/// The commands that may transition a given record kind.
pub fn applicable_commands(kind: RecordKind) -> Vec<CommandKind> {
    REGISTRY
        .iter()
        .filter(|(_, record, _)| *record == kind)
        .map(|(command, _, _)| *command)
        .collect()
}
