//! # Validation Engine Subsystem (AC-02)
//!
//! The declarative core of the ledger: a pure function from a proposed
//! transaction to accept-or-reject. Every party and the notary run the same
//! engine over the same bytes; a transaction is valid exactly when `verify`
//! returns `Ok` for it.
//!
//! ## Properties
//!
//! - **Pure**: no I/O, no clock, no randomness. Same input, same verdict.
//! - **Total rejection**: any failing clause voids the whole transaction;
//!   there is no partial acceptance.
//! - **Exhaustive dispatch**: commands are matched exhaustively; adding a
//!   command variant breaks compilation until every rule site handles it. A
//!   command missing from the catalog registry is a hard reject, never a
//!   silent pass.
//! - **Diagnosable rejects**: every rejection names the violated rule and
//!   carries a human-readable message.

pub mod engine;
pub mod errors;
pub mod rules;

pub use engine::ValidationEngine;
pub use errors::ValidationError;
