//! # Engine Dispatch
//!
//! Command-by-command dispatch into the rule families. The match below is
//! exhaustive over the closed command enums, so a new command variant fails
//! compilation here until a rule is assigned. Registry membership is checked
//! first: a command outside the catalog is rejected outright.

use crate::errors::ValidationError;
use crate::rules;
use ac_01_record_catalog::catalog;
use ac_01_record_catalog::commands::{
    AnnotationCommand, CommandKind, ObligationCommand, ReceiptCommand,
};
use ac_01_record_catalog::transaction::ProposedTransaction;
use tracing::debug;

/// The shared validation engine. Stateless; every party holds an identical
/// instance and must reach an identical verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Accept or reject a proposed transaction.
    ///
    /// Every command is verified under its rule family against the whole
    /// transaction; joint settlements additionally pass the cross-kind link
    /// rule. The first violation rejects the transaction in full.
    pub fn verify(&self, tx: &ProposedTransaction) -> Result<(), ValidationError> {
        if tx.commands.is_empty() {
            debug!("rejecting transaction with no commands");
            return Err(ValidationError::NoCommands);
        }

        for command in &tx.commands {
            if !catalog::is_registered(&command.kind) {
                debug!(command = command.kind.name(), "rejecting unregistered command");
                return Err(ValidationError::UnrecognisedCommand(
                    command.kind.name().to_owned(),
                ));
            }

            let verdict = match command.kind {
                CommandKind::Obligation(ObligationCommand::Create) => {
                    rules::verify_obligation_create(tx, &command.signers)
                }
                CommandKind::Obligation(ObligationCommand::UpdateValue) => {
                    rules::verify_obligation_update(tx, &command.signers)
                }
                CommandKind::Obligation(ObligationCommand::MarkPaid) => {
                    rules::verify_obligation_paid(tx, &command.signers)
                }
                CommandKind::Receipt(ReceiptCommand::Create) => {
                    rules::verify_receipt_create(tx, &command.signers)
                }
                CommandKind::Annotation(AnnotationCommand::Create) => {
                    rules::verify_annotation_create(tx, &command.signers)
                }
            };
            if let Err(violation) = verdict {
                debug!(command = command.kind.name(), %violation, "rejecting transaction");
                return Err(violation);
            }
        }

        if self.is_joint_settlement(tx) {
            rules::verify_settlement_link(tx)?;
        }

        Ok(())
    }

    fn is_joint_settlement(&self, tx: &ProposedTransaction) -> bool {
        let marks_paid = tx
            .commands
            .iter()
            .any(|c| c.kind == CommandKind::Obligation(ObligationCommand::MarkPaid));
        let creates_receipt = tx
            .commands
            .iter()
            .any(|c| c.kind == CommandKind::Receipt(ReceiptCommand::Create));
        marks_paid && creates_receipt
    }
}
