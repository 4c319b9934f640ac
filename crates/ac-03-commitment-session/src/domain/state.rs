//! # Session State Machine
//!
//! The protocol's checkpoints as an explicit, inspectable value. The proposer
//! publishes every transition on a `tokio::sync::watch` channel; observers
//! hold the read half and can never influence the session.

use tokio::sync::watch;
use tracing::{debug, warn};

/// Where a commitment attempt currently stands.
///
/// Terminal states are `Committed` and `Failed`; everything else advances
/// strictly left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Resolving current record versions and assembling the proposal.
    Building,
    /// The shared validation engine accepted the proposal.
    LocallyVerified,
    /// The proposer's own signature is attached.
    SelfSigned,
    /// Waiting on counterparty signatures.
    CollectingSignatures,
    /// Waiting on the notary's uniqueness check and seal.
    Notarizing,
    /// Finalized and handed to distribution. Terminal.
    Committed,
    /// The attempt is dead; the reason is diagnosable. Terminal.
    Failed(String),
}

impl SessionState {
    /// Whether this state ends the attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Committed | SessionState::Failed(_))
    }

    /// Checkpoint name, used in logs and timeout errors.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Building => "building",
            SessionState::LocallyVerified => "locally-verified",
            SessionState::SelfSigned => "self-signed",
            SessionState::CollectingSignatures => "collecting-signatures",
            SessionState::Notarizing => "notarizing",
            SessionState::Committed => "committed",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Write half of the session's observable progress.
#[derive(Debug)]
pub struct SessionProgress {
    sender: watch::Sender<SessionState>,
}

impl SessionProgress {
    /// Start at `Building`.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SessionState::Building);
        Self { sender }
    }

    /// A read-only view of the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Advance to the next checkpoint.
    pub fn advance(&self, state: SessionState) {
        debug!(checkpoint = state.name(), "session checkpoint");
        // Observers may have gone away; the session does not care.
        let _ = self.sender.send(state);
    }

    /// Terminate at `Failed`, recording the reason.
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "session failed");
        let _ = self.sender.send(SessionState::Failed(reason));
    }
}

impl Default for SessionProgress {
    fn default() -> Self {
        Self::new()
    }
}
