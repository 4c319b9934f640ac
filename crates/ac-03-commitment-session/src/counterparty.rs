//! # Counterparty Node
//!
//! Reacts to proposals arriving on a session channel. Every proposal is
//! re-verified against the same canonical engine the proposer used; on top
//! of that, each node may carry a private acceptance policy of its own.
//!
//! Policies narrow, never widen: the engine check always runs first, so a
//! node can refuse more than the shared contract but never accept more.
//! Policies stay local and are not disclosed to peers; two counterparties
//! may legitimately apply different caps to the same transaction.

use crate::channel::{SessionEndpoint, SessionMessage};
use ac_01_record_catalog::records::RecordKind;
use ac_01_record_catalog::transaction::{ProposedTransaction, SignedTransaction};
use ac_02_validation_engine::ValidationEngine;
use shared_crypto::SigningKeys;
use shared_types::Party;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A node-local acceptance predicate, applied after the shared engine check.
pub trait AcceptancePolicy: Send + Sync {
    /// `Err(reason)` refuses the proposal; the reason travels in the abort.
    fn check(&self, tx: &ProposedTransaction) -> Result<(), String>;
}

/// The permissive default: the shared contract is the only gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AcceptancePolicy for AcceptAll {
    fn check(&self, _tx: &ProposedTransaction) -> Result<(), String> {
        Ok(())
    }
}

/// Refuses any obligation output above a private threshold.
#[derive(Debug, Clone, Copy)]
pub struct ValueCap(pub i64);

impl AcceptancePolicy for ValueCap {
    fn check(&self, tx: &ProposedTransaction) -> Result<(), String> {
        for output in tx.outputs_of(RecordKind::Obligation) {
            if let Some(obligation) = output.as_obligation() {
                if obligation.value > self.0 {
                    return Err(format!(
                        "won't accept obligations with a value over {}",
                        self.0
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Requires the settle shape: exactly one obligation output and one receipt
/// output in the same transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementShape;

impl AcceptancePolicy for SettlementShape {
    fn check(&self, tx: &ProposedTransaction) -> Result<(), String> {
        if tx.outputs_of(RecordKind::Obligation).len() != 1 {
            return Err("this must be an obligation transaction".into());
        }
        if tx.outputs_of(RecordKind::Receipt).len() != 1 {
            return Err("this must be a settlement transaction".into());
        }
        Ok(())
    }
}

/// A party's reactive side of the protocol.
pub struct CounterpartyNode {
    party: Party,
    keys: Arc<SigningKeys>,
    engine: ValidationEngine,
    policy: Box<dyn AcceptancePolicy>,
}

impl CounterpartyNode {
    /// A node with the permissive default policy.
    pub fn new(party: Party, keys: Arc<SigningKeys>) -> Self {
        Self {
            party,
            keys,
            engine: ValidationEngine::new(),
            policy: Box::new(AcceptAll),
        }
    }

    /// Attach a private acceptance policy.
    pub fn with_policy(mut self, policy: impl AcceptancePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Serve proposals on one endpoint until the peer goes away.
    ///
    /// Each proposal gets exactly one reply: a signature or an abort.
    pub async fn serve(&self, mut endpoint: SessionEndpoint) {
        while let Some(message) = endpoint.recv().await {
            match message {
                SessionMessage::Proposal(proposal) => {
                    let reply = match self.evaluate(&proposal) {
                        Ok(signature) => {
                            info!(party = %self.party, id = ?proposal.id, "signing proposal");
                            SessionMessage::SignatureResponse {
                                key: self.party.key,
                                signature,
                            }
                        }
                        Err(reason) => {
                            info!(party = %self.party, %reason, "aborting proposal");
                            SessionMessage::Abort { reason }
                        }
                    };
                    if !endpoint.send(reply).await {
                        warn!(party = %self.party, "proposer went away before the reply");
                        return;
                    }
                }
                other => {
                    debug!(party = %self.party, ?other, "ignoring non-proposal message");
                }
            }
        }
    }

    /// Decide on one proposal: canonical verification, then local policy.
    fn evaluate(&self, proposal: &SignedTransaction) -> Result<shared_types::Signature, String> {
        match proposal.digest_matches() {
            Ok(true) => {}
            Ok(false) => return Err("transaction id does not match its content".into()),
            Err(error) => return Err(error.to_string()),
        }
        proposal
            .verify_signatures()
            .map_err(|error| format!("attached signature invalid: {error}"))?;
        self.engine
            .verify(&proposal.content)
            .map_err(|error| error.to_string())?;
        self.policy.check(&proposal.content)?;
        Ok(self.keys.sign(&proposal.id))
    }
}
