//! Terminal failure modes of a commitment attempt.

use crate::ports::outbound::{DistributionError, NotaryError, VaultError};
use ac_02_validation_engine::ValidationError;
use shared_crypto::CryptoError;
use shared_types::PublicKey;
use thiserror::Error;

/// Why a commitment attempt died.
///
/// All of these are terminal for the attempt. Recovery means re-querying
/// current state and building a fresh session; that policy belongs to the
/// caller, never to this crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The shared validation engine rejected the proposal.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required signer never produced a signature.
    #[error("missing signature from required signer {key:02x?}")]
    MissingSigner {
        /// The absent signer's key.
        key: PublicKey,
    },

    /// A counterparty refused to sign.
    #[error("counterparty {party} aborted: {reason}")]
    CounterpartyAbort {
        /// Who refused.
        party: String,
        /// Their stated reason.
        reason: String,
    },

    /// The notary refused the transaction.
    #[error(transparent)]
    Notary(#[from] NotaryError),

    /// Current state could not be resolved.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// A bounded wait expired.
    #[error("timed out while {stage}")]
    Timeout {
        /// The checkpoint that was waiting.
        stage: &'static str,
    },

    /// The session channel to a counterparty closed mid-protocol.
    #[error("session channel to {party} closed")]
    ChannelClosed {
        /// The unreachable peer.
        party: String,
    },

    /// A peer sent something the protocol does not allow here.
    #[error("protocol violation from {party}: {detail}")]
    Protocol {
        /// The misbehaving peer.
        party: String,
        /// What arrived.
        detail: String,
    },

    /// Signing or digesting failed locally.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A local invariant broke; indicates a bug, not a peer failure.
    #[error("internal session failure: {0}")]
    Internal(String),

    /// The transaction committed but a participant's storage rejected it.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}
