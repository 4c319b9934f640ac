//! # Proposer Session
//!
//! One commitment attempt, driven end to end by the proposing party. The
//! session consumes itself on `run`: a failed attempt cannot be resumed or
//! retried, only replaced by a fresh one built from re-queried state.

use crate::builder::TransactionBuilder;
use crate::channel::{SessionEndpoint, SessionMessage};
use crate::domain::errors::SessionError;
use crate::domain::intent::TransactionIntent;
use crate::domain::state::{SessionProgress, SessionState};
use crate::ports::outbound::{
    expect_single_current, FinalityDistributor, NotaryClient, VaultQuery,
};
use ac_01_record_catalog::commands::{
    AnnotationCommand, Command, CommandKind, ObligationCommand, ReceiptCommand,
};
use ac_01_record_catalog::records::{
    AnnotationRecord, LedgerRecord, ObligationRecord, ReceiptRecord, RecordKind,
};
use ac_01_record_catalog::transaction::{
    FinalizedTransaction, ProposedTransaction, SignedTransaction,
};
use ac_02_validation_engine::ValidationEngine;
use shared_crypto::{verify_signature, SigningKeys};
use shared_types::{LinearId, Party, PublicKey, Signature};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info};

/// Bounds on the session's two suspension points.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for each counterparty's signature or abort.
    pub collect_timeout: Duration,
    /// How long to wait for the notary.
    pub notary_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            collect_timeout: Duration::from_secs(30),
            notary_timeout: Duration::from_secs(10),
        }
    }
}

/// A single commitment attempt from the proposer's side.
pub struct ProposerSession<V, N, D> {
    party: Party,
    keys: Arc<SigningKeys>,
    vault: Arc<V>,
    notary: Arc<N>,
    distributor: Arc<D>,
    engine: ValidationEngine,
    config: SessionConfig,
    progress: SessionProgress,
}

impl<V, N, D> ProposerSession<V, N, D>
where
    V: VaultQuery,
    N: NotaryClient,
    D: FinalityDistributor,
{
    /// A session for `party`, wired to its collaborators.
    pub fn new(
        party: Party,
        keys: Arc<SigningKeys>,
        vault: Arc<V>,
        notary: Arc<N>,
        distributor: Arc<D>,
    ) -> Self {
        Self {
            party,
            keys,
            vault,
            notary,
            distributor,
            engine: ValidationEngine::new(),
            config: SessionConfig::default(),
            progress: SessionProgress::new(),
        }
    }

    /// Override the suspension bounds.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Read-only observation of the session's checkpoints.
    pub fn observe(&self) -> watch::Receiver<SessionState> {
        self.progress.subscribe()
    }

    /// Drive the attempt to finality.
    ///
    /// `counterparties` holds one session channel endpoint per counterparty
    /// whose signature the transition needs. The attempt is terminal either
    /// way: `Ok` means committed, notarized, and distributed; `Err` means
    /// nothing anywhere was mutated.
    pub async fn run(
        self,
        intent: TransactionIntent,
        counterparties: Vec<SessionEndpoint>,
    ) -> Result<FinalizedTransaction, SessionError> {
        info!(party = %self.party, intent = intent.name(), "starting commitment attempt");
        match self.drive(intent, counterparties).await {
            Ok(finalized) => {
                self.progress.advance(SessionState::Committed);
                info!(id = ?finalized.id(), "transaction committed");
                Ok(finalized)
            }
            Err(error) => {
                self.progress.fail(error.to_string());
                Err(error)
            }
        }
    }

    async fn drive(
        &self,
        intent: TransactionIntent,
        counterparties: Vec<SessionEndpoint>,
    ) -> Result<FinalizedTransaction, SessionError> {
        // Building: resolve current state and assemble the proposal.
        let proposed = self.build(intent).await?;

        // Local verification gates all network interaction.
        self.engine.verify(&proposed)?;
        self.progress.advance(SessionState::LocallyVerified);

        // Self-sign.
        let mut stx = SignedTransaction::new(proposed)?;
        stx.attach(self.party.key, self.keys.sign(&stx.id));
        self.progress.advance(SessionState::SelfSigned);

        // Collect counterparty signatures; one refusal sinks the attempt.
        self.progress.advance(SessionState::CollectingSignatures);
        for (key, signature) in self.collect_signatures(&stx, counterparties).await? {
            stx.attach(key, signature);
        }
        if let Some(key) = stx.missing_signers().into_iter().next() {
            return Err(SessionError::MissingSigner { key });
        }

        // Notarize: the single point of total ordering over consumption.
        self.progress.advance(SessionState::Notarizing);
        let seal = timeout(self.config.notary_timeout, self.notary.commit(&stx))
            .await
            .map_err(|_| SessionError::Timeout { stage: "notarizing" })??;
        let finalized = FinalizedTransaction {
            transaction: stx,
            seal,
        };

        // Hand to every participant's storage collaborator.
        self.distributor.distribute(&finalized).await?;
        Ok(finalized)
    }

    /// Turn an intent into a concrete proposal against current vault state.
    async fn build(&self, intent: TransactionIntent) -> Result<ProposedTransaction, SessionError> {
        let tx = match intent {
            TransactionIntent::CreateObligation { value, borrower } => {
                let record = ObligationRecord::issue(value, self.party.clone(), borrower);
                let signers = [record.lender.key, record.borrower.key];
                TransactionBuilder::new()
                    .add_output(LedgerRecord::Obligation(record))
                    .add_command(Command::new(
                        CommandKind::Obligation(ObligationCommand::Create),
                        signers,
                    ))
                    .build()
            }
            TransactionIntent::UpdateValue {
                linear_id,
                new_value,
            } => {
                let (entry, input) = self.resolve_obligation(&linear_id).await?;
                let output = input.with_value(new_value);
                let signers = [
                    input.lender.key,
                    input.borrower.key,
                    output.lender.key,
                    output.borrower.key,
                ];
                TransactionBuilder::new()
                    .add_input(entry)
                    .add_output(LedgerRecord::Obligation(output))
                    .add_command(Command::new(
                        CommandKind::Obligation(ObligationCommand::UpdateValue),
                        signers,
                    ))
                    .build()
            }
            TransactionIntent::SettleObligation { linear_id } => {
                let (entry, input) = self.resolve_obligation(&linear_id).await?;
                let settled = input.marked_paid();
                let receipt = ReceiptRecord {
                    obligation_id: linear_id,
                    lender: input.lender.clone(),
                    borrower: input.borrower.clone(),
                    linear_id: LinearId::new(),
                };
                let signers = [input.lender.key, input.borrower.key];
                TransactionBuilder::new()
                    .add_input(entry)
                    .add_output(LedgerRecord::Obligation(settled))
                    .add_output(LedgerRecord::Receipt(receipt))
                    .add_command(Command::new(
                        CommandKind::Obligation(ObligationCommand::MarkPaid),
                        signers,
                    ))
                    .add_command(Command::new(
                        CommandKind::Receipt(ReceiptCommand::Create),
                        signers,
                    ))
                    .build()
            }
            TransactionIntent::AnnotateObligation {
                linear_id,
                description,
                counterparty,
            } => {
                let (entry, input) = self.resolve_obligation(&linear_id).await?;
                let record = AnnotationRecord {
                    ref_id: input.linear_id,
                    ref_kind: RecordKind::Obligation,
                    description,
                    lender: self.party.clone(),
                    borrower: counterparty.clone(),
                    linear_id: LinearId::new(),
                };
                TransactionBuilder::new()
                    .add_reference(entry)
                    .add_output(LedgerRecord::Annotation(record))
                    .add_command(Command::new(
                        CommandKind::Annotation(AnnotationCommand::Create),
                        [self.party.key, counterparty.key],
                    ))
                    .build()
            }
        };
        Ok(tx)
    }

    async fn resolve_obligation(
        &self,
        linear_id: &LinearId,
    ) -> Result<
        (
            ac_01_record_catalog::transaction::RecordEntry,
            ObligationRecord,
        ),
        SessionError,
    > {
        let entry =
            expect_single_current(&*self.vault, RecordKind::Obligation, linear_id).await?;
        let record = entry
            .record
            .as_obligation()
            .cloned()
            .ok_or_else(|| SessionError::Internal("vault returned a non-obligation record".into()))?;
        Ok((entry, record))
    }

    /// Fan the proposal out and gather every response concurrently.
    ///
    /// The first abort, timeout, or dead channel cancels all still-pending
    /// waits and fails the attempt; a partial signature set is never used.
    async fn collect_signatures(
        &self,
        stx: &SignedTransaction,
        counterparties: Vec<SessionEndpoint>,
    ) -> Result<Vec<(PublicKey, Signature)>, SessionError> {
        let mut pending: JoinSet<Result<(PublicKey, Signature), SessionError>> = JoinSet::new();
        for endpoint in counterparties {
            let proposal = stx.clone();
            let deadline = self.config.collect_timeout;
            pending.spawn(request_signature(endpoint, proposal, deadline));
        }

        let mut collected = Vec::new();
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok(Ok(signature)) => collected.push(signature),
                Ok(Err(error)) => {
                    pending.abort_all();
                    return Err(error);
                }
                Err(join_error) => {
                    pending.abort_all();
                    return Err(SessionError::Internal(join_error.to_string()));
                }
            }
        }
        Ok(collected)
    }
}

/// One counterparty round trip: send the proposal, await exactly one reply.
async fn request_signature(
    mut endpoint: SessionEndpoint,
    proposal: SignedTransaction,
    deadline: Duration,
) -> Result<(PublicKey, Signature), SessionError> {
    let party = endpoint.peer.clone();
    let expected_id = proposal.id;

    if !endpoint.send(SessionMessage::Proposal(proposal)).await {
        return Err(SessionError::ChannelClosed { party });
    }
    debug!(%party, "proposal sent, awaiting response");

    let reply = timeout(deadline, endpoint.recv())
        .await
        .map_err(|_| SessionError::Timeout {
            stage: "collecting-signatures",
        })?;

    match reply {
        Some(SessionMessage::SignatureResponse { key, signature }) => {
            // Never trust a claimed signature; check it against the digest.
            verify_signature(&key, &expected_id, &signature).map_err(|_| {
                SessionError::Protocol {
                    party: party.clone(),
                    detail: "signature does not verify against the transaction id".into(),
                }
            })?;
            debug!(%party, "signature collected");
            Ok((key, signature))
        }
        Some(SessionMessage::Abort { reason }) => {
            Err(SessionError::CounterpartyAbort { party, reason })
        }
        Some(SessionMessage::Proposal(_)) => Err(SessionError::Protocol {
            party,
            detail: "counterparty sent a proposal mid-session".into(),
        }),
        None => Err(SessionError::ChannelClosed { party }),
    }
}
