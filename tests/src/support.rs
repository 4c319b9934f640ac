//! Shared fixtures: deterministic participants, wired collaborators, and a
//! tracing bootstrap for debugging failing scenarios with `RUST_LOG`.

use ac_01_record_catalog::transaction::FinalizedTransaction;
use ac_03_commitment_session::adapters::{InMemoryNotary, InMemoryVault, VaultDistributor};
use ac_03_commitment_session::{
    memory_channel, CounterpartyNode, ProposerSession, SessionError, TransactionIntent,
};
use shared_crypto::SigningKeys;
use shared_types::Party;
use std::sync::Arc;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a tracing subscriber once per process; honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// One party with its keys and its own vault.
pub struct Participant {
    pub party: Party,
    pub keys: Arc<SigningKeys>,
    pub vault: Arc<InMemoryVault>,
}

impl Participant {
    /// Deterministic identity derived from a seed byte.
    pub fn new(name: &str, seed: u8) -> Self {
        let keys = Arc::new(SigningKeys::from_seed([seed; 32]));
        let party = Party::new(name, keys.public_key());
        let vault = Arc::new(InMemoryVault::new(name));
        Self { party, keys, vault }
    }

    /// A counterparty node for this participant.
    pub fn node(&self) -> CounterpartyNode {
        CounterpartyNode::new(self.party.clone(), self.keys.clone())
    }
}

/// The standard two-party network: MegaCorp (proposer side), MiniCorp
/// (counterparty side), one notary, distribution to both vaults.
pub struct TestNet {
    pub mega: Participant,
    pub mini: Participant,
    pub notary: Arc<InMemoryNotary>,
    pub distributor: Arc<VaultDistributor>,
}

impl TestNet {
    pub fn new() -> Self {
        init_tracing();
        let mega = Participant::new("MegaCorp", 11);
        let mini = Participant::new("MiniCorp", 22);
        let notary = Arc::new(InMemoryNotary::from_seed([99; 32]));
        let distributor = Arc::new(VaultDistributor::new(vec![
            mega.vault.clone(),
            mini.vault.clone(),
        ]));
        Self {
            mega,
            mini,
            notary,
            distributor,
        }
    }

    /// A fresh proposer-side session for MegaCorp.
    pub fn mega_session(
        &self,
    ) -> ProposerSession<InMemoryVault, InMemoryNotary, VaultDistributor> {
        ProposerSession::new(
            self.mega.party.clone(),
            self.mega.keys.clone(),
            self.mega.vault.clone(),
            self.notary.clone(),
            self.distributor.clone(),
        )
    }
}

impl Default for TestNet {
    fn default() -> Self {
        Self::new()
    }
}

impl TestNet {
    /// Run one MegaCorp-proposed attempt against a single counterparty node.
    ///
    /// Wires a session channel, serves the node on its end, and tears the
    /// server down once the attempt resolves.
    pub async fn run_mega(
        &self,
        intent: TransactionIntent,
        node: CounterpartyNode,
    ) -> Result<FinalizedTransaction, SessionError> {
        let (proposer_end, counterparty_end) =
            memory_channel(&self.mega.party.name, &self.mini.party.name);
        let node = Arc::new(node);
        let server = tokio::spawn({
            let node = node.clone();
            async move { node.serve(counterparty_end).await }
        });

        let result = self.mega_session().run(intent, vec![proposer_end]).await;
        server.abort();
        result
    }

    /// Issue an obligation MegaCorp → MiniCorp and return the finalized
    /// transaction. Most scenarios start from here.
    pub async fn create_obligation(&self, value: i64) -> FinalizedTransaction {
        self.run_mega(
            TransactionIntent::CreateObligation {
                value,
                borrower: self.mini.party.clone(),
            },
            self.mini.node(),
        )
        .await
        .expect("obligation issue should commit")
    }
}
