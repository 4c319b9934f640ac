//! # Record Catalog Subsystem (AC-01)
//!
//! Defines what can live on the ledger and how it may change:
//!
//! - **Record kinds** (`records`): the closed set of versioned entity shapes,
//!   each with a stable linear identity and distinguished lender/borrower
//!   roles.
//! - **Commands** (`commands`): the closed, per-kind set of transition names,
//!   each carrying its required signer keys.
//! - **Catalog** (`catalog`): the registry mapping record kinds to applicable
//!   commands and each command to its governing rule family.
//! - **Comparators** (`compare`): explicit field-by-field equality used by the
//!   "everything equal except one field" transition rules.
//! - **Transactions** (`transaction`): proposed, signed, and finalized
//!   transaction shapes built from records and commands.
//!
//! Validation logic lives in `ac-02-validation-engine`; this crate is data
//! definitions only.

pub mod catalog;
pub mod commands;
pub mod compare;
pub mod records;
pub mod transaction;

pub use catalog::{applicable_commands, is_registered, rule_family, RuleFamily};
pub use commands::{AnnotationCommand, Command, CommandKind, ObligationCommand, ReceiptCommand};
pub use records::{
    AnnotationRecord, LedgerRecord, ObligationRecord, ReceiptRecord, RecordKind,
};
pub use transaction::{
    FinalizedTransaction, NotarySeal, ProposedTransaction, RecordEntry, SignedTransaction,
};
