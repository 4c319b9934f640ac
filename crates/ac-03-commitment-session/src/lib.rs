//! # Commitment Session Subsystem (AC-03)
//!
//! Drives a proposed ledger transition from construction to finality across
//! mutually distrusting parties.
//!
//! ## Architecture
//!
//! Hexagonal, like the other subsystems:
//! - **Domain** (`domain/`): the session state machine, intents, and errors
//! - **Ports** (`ports/`): traits for the vault, the notary, and distribution
//! - **Adapters** (`adapters/`): in-memory implementations for embedding and
//!   for the test harness
//! - **Services**: `ProposerSession` (drives an attempt) and
//!   `CounterpartyNode` (reacts to proposals)
//!
//! ## Protocol
//!
//! ```text
//! Building → LocallyVerified → SelfSigned → CollectingSignatures → Notarizing → Committed
//!     │             │               │                │                  │
//!     └─────────────┴───────────────┴────────────────┴──────────────────┴──→ Failed
//! ```
//!
//! A session is one attempt: any abort, timeout, validation failure, or
//! notary conflict is terminal for it, and nothing shared is mutated until
//! notarization succeeds. Retrying means re-querying current state and
//! running a fresh session; no retry happens in here.

pub mod adapters;
pub mod builder;
pub mod channel;
pub mod counterparty;
pub mod domain;
pub mod ports;
pub mod proposer;

pub use builder::TransactionBuilder;
pub use channel::{memory_channel, SessionEndpoint, SessionMessage};
pub use counterparty::{AcceptAll, AcceptancePolicy, CounterpartyNode, SettlementShape, ValueCap};
pub use domain::errors::SessionError;
pub use domain::intent::TransactionIntent;
pub use domain::state::SessionState;
pub use ports::outbound::{
    expect_single_current, DistributionError, FinalityDistributor, NotaryClient, NotaryError,
    VaultError, VaultQuery,
};
pub use proposer::{ProposerSession, SessionConfig};
