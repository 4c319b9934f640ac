//! # In-Memory Notary
//!
//! A single-process stand-in for the external uniqueness service. It keeps
//! the map of every consumed reference to the transaction that consumed it,
//! checks and records consumption atomically under one lock, and seals
//! commits with its own key. The decision logic — all inputs free, or the
//! whole transaction is refused — is the contract real deployments honour.

use crate::ports::outbound::{NotaryClient, NotaryError};
use ac_01_record_catalog::transaction::{NotarySeal, SignedTransaction};
use parking_lot::Mutex;
use shared_crypto::SigningKeys;
use shared_types::{PublicKey, RecordRef, Timestamp, TxId};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// The notary service, holding its signing identity and spent-set.
pub struct InMemoryNotary {
    keys: SigningKeys,
    consumed: Mutex<HashMap<RecordRef, TxId>>,
}

impl InMemoryNotary {
    /// A notary with a fresh random identity.
    pub fn new() -> Self {
        Self {
            keys: SigningKeys::generate(),
            consumed: Mutex::new(HashMap::new()),
        }
    }

    /// A notary with a deterministic identity, for fixtures.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            keys: SigningKeys::from_seed(seed),
            consumed: Mutex::new(HashMap::new()),
        }
    }

    /// The notary's public identity.
    pub fn public_key(&self) -> PublicKey {
        self.keys.public_key()
    }

    fn now_millis() -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

impl Default for InMemoryNotary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NotaryClient for InMemoryNotary {
    async fn commit(&self, transaction: &SignedTransaction) -> Result<NotarySeal, NotaryError> {
        // Completeness and integrity before uniqueness.
        if let Some(key) = transaction.missing_signers().into_iter().next() {
            return Err(NotaryError::SignatureVerification(format!(
                "missing signature from {key:02x?}"
            )));
        }
        match transaction.digest_matches() {
            Ok(true) => {}
            Ok(false) => {
                return Err(NotaryError::SignatureVerification(
                    "transaction id does not match its content".into(),
                ))
            }
            Err(error) => return Err(NotaryError::SignatureVerification(error.to_string())),
        }
        transaction
            .verify_signatures()
            .map_err(|error| NotaryError::SignatureVerification(error.to_string()))?;

        // Check-then-record must be atomic: competing transactions serialize
        // here and nowhere else.
        {
            let mut consumed = self.consumed.lock();
            for input in &transaction.content.inputs {
                if let Some(conflicting) = consumed.get(&input.reference) {
                    warn!(
                        reference = %input.reference,
                        "refusing double consumption"
                    );
                    return Err(NotaryError::DoubleSpend {
                        conflicting: *conflicting,
                    });
                }
            }
            for input in &transaction.content.inputs {
                consumed.insert(input.reference, transaction.id);
            }
        }

        let timestamp = Self::now_millis();
        let signature = self
            .keys
            .sign(&NotarySeal::signed_bytes(&transaction.id, timestamp));
        debug!(id = ?transaction.id, timestamp, "transaction notarized");
        Ok(NotarySeal {
            notary: self.keys.public_key(),
            signature,
            timestamp,
        })
    }
}
