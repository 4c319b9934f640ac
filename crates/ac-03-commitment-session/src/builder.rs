//! # Transaction Builder
//!
//! Assembles a proposal from resolved inputs, desired outputs, and commands.
//! The builder itself enforces nothing; the validation engine is the only
//! judge, and the session runs it over the built proposal before anything
//! leaves the proposer's process.

use ac_01_record_catalog::commands::Command;
use ac_01_record_catalog::records::LedgerRecord;
use ac_01_record_catalog::transaction::{ProposedTransaction, RecordEntry};

/// Accumulates the pieces of a proposed transition.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    inputs: Vec<RecordEntry>,
    references: Vec<RecordEntry>,
    outputs: Vec<LedgerRecord>,
    commands: Vec<Command>,
}

impl TransactionBuilder {
    /// Start an empty proposal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a resolved record version.
    pub fn add_input(mut self, entry: RecordEntry) -> Self {
        self.inputs.push(entry);
        self
    }

    /// Read a resolved record version without consuming it.
    pub fn add_reference(mut self, entry: RecordEntry) -> Self {
        self.references.push(entry);
        self
    }

    /// Create a record.
    pub fn add_output(mut self, record: LedgerRecord) -> Self {
        self.outputs.push(record);
        self
    }

    /// Name a transition and its required signers.
    pub fn add_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// The assembled proposal.
    pub fn build(self) -> ProposedTransaction {
        ProposedTransaction {
            inputs: self.inputs,
            references: self.references,
            outputs: self.outputs,
            commands: self.commands,
        }
    }
}
