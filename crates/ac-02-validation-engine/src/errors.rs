//! Rejection types for transition verification.

use thiserror::Error;

/// Why a proposed transaction was rejected.
///
/// Rejection is always on the whole transaction; none of its effects apply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A named rule's clause failed.
    #[error("rule {rule} violated: {message}")]
    Rule {
        /// The violated rule family instance.
        rule: &'static str,
        /// Which clause failed, for diagnosis and for rebuilding a corrected
        /// transaction.
        message: String,
    },

    /// The command is not in the catalog registry.
    #[error("unrecognised command: {0}")]
    UnrecognisedCommand(String),

    /// A transaction without commands names no transition at all.
    #[error("a transaction must carry at least one command")]
    NoCommands,
}

impl ValidationError {
    /// Shorthand used throughout the rule clauses.
    pub(crate) fn rule(rule: &'static str, message: impl Into<String>) -> Self {
        ValidationError::Rule {
            rule,
            message: message.into(),
        }
    }
}
