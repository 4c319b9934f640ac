//! # Session Channel
//!
//! The ordered, reliable, point-to-point stream between a proposer and one
//! counterparty. Exactly three message types cross it; everything else in
//! the protocol (notarization, distribution) goes through other ports.

use ac_01_record_catalog::transaction::SignedTransaction;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{PublicKey, Signature};
use tokio::sync::mpsc;

/// Default per-peer buffering before senders are backpressured.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// One protocol message.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionMessage {
    /// Proposer → counterparty: a partially signed transaction to evaluate.
    Proposal(SignedTransaction),
    /// Counterparty → proposer: a signature over the transaction id.
    SignatureResponse {
        /// The signer.
        key: PublicKey,
        /// Signature over the proposed transaction's id.
        #[serde_as(as = "Bytes")]
        signature: Signature,
    },
    /// Counterparty → proposer: refusal, with a diagnosable reason.
    Abort {
        /// Why the counterparty refused.
        reason: String,
    },
}

/// One end of a session channel.
///
/// Holding an endpoint is holding the conversation: dropping it closes the
/// stream and the peer observes the close on its next receive.
#[derive(Debug)]
pub struct SessionEndpoint {
    /// The peer's display name, for diagnostics.
    pub peer: String,
    sender: mpsc::Sender<SessionMessage>,
    receiver: mpsc::Receiver<SessionMessage>,
}

impl SessionEndpoint {
    /// Send one message to the peer.
    ///
    /// Returns `false` if the peer has gone away.
    pub async fn send(&self, message: SessionMessage) -> bool {
        self.sender.send(message).await.is_ok()
    }

    /// Receive the next message, `None` once the peer is gone.
    pub async fn recv(&mut self) -> Option<SessionMessage> {
        self.receiver.recv().await
    }
}

/// An in-memory duplex channel between two named peers.
///
/// Returns `(a_end, b_end)` where `a_end.peer` names `b` and vice versa.
pub fn memory_channel(a: &str, b: &str) -> (SessionEndpoint, SessionEndpoint) {
    let (a_to_b, from_a) = mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
    let (b_to_a, from_b) = mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
    (
        SessionEndpoint {
            peer: b.to_owned(),
            sender: a_to_b,
            receiver: from_b,
        },
        SessionEndpoint {
            peer: a.to_owned(),
            sender: b_to_a,
            receiver: from_a,
        },
    )
}
