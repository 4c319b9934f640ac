//! Single-consumption guarantees: once a record version is consumed by a
//! finalized transaction, every later attempt on it fails with a
//! double-spend error, whether resubmitted directly or raced by a second
//! session that read stale state.

#[cfg(test)]
mod tests {
    use crate::support::TestNet;
    use ac_01_record_catalog::commands::{Command, CommandKind, ObligationCommand};
    use ac_01_record_catalog::records::{LedgerRecord, RecordKind};
    use ac_01_record_catalog::transaction::{ProposedTransaction, SignedTransaction};
    use ac_03_commitment_session::adapters::InMemoryVault;
    use ac_03_commitment_session::{
        expect_single_current, NotaryClient, NotaryError, ProposerSession, SessionError,
        TransactionIntent,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn resubmitting_consumed_inputs_is_a_double_spend_never_a_second_commit() {
        let net = TestNet::new();
        let issued = net.create_obligation(90).await;
        let lineage = issued.transaction.content.outputs[0].linear_id();

        // Capture the issued version while it is still current.
        let stale_entry =
            expect_single_current(net.mega.vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .unwrap();

        // A legitimate amendment consumes that version.
        let amended = net
            .run_mega(
                TransactionIntent::UpdateValue {
                    linear_id: lineage,
                    new_value: 42,
                },
                net.mini.node(),
            )
            .await
            .unwrap();

        // Hand-build a second, engine-valid amendment over the stale version
        // and push it straight at the notary.
        let input = stale_entry.record.as_obligation().cloned().unwrap();
        let replay = ProposedTransaction {
            inputs: vec![stale_entry],
            outputs: vec![LedgerRecord::Obligation(input.with_value(7))],
            commands: vec![Command::new(
                CommandKind::Obligation(ObligationCommand::UpdateValue),
                [net.mega.party.key, net.mini.party.key],
            )],
            ..Default::default()
        };
        let mut stx = SignedTransaction::new(replay).unwrap();
        stx.attach(net.mega.party.key, net.mega.keys.sign(&stx.id));
        stx.attach(net.mini.party.key, net.mini.keys.sign(&stx.id));

        let error = net.notary.commit(&stx).await.unwrap_err();
        assert_eq!(
            error,
            NotaryError::DoubleSpend {
                conflicting: amended.id()
            }
        );
    }

    #[tokio::test]
    async fn racing_sessions_over_one_lineage_serialize_at_the_notary() {
        let net = TestNet::new();
        let issued = net.create_obligation(90).await;
        let lineage = issued.transaction.content.outputs[0].linear_id();

        // A second proposer reads the same current version before the first
        // commits: model the stale read with a snapshot vault.
        let stale_vault = Arc::new(InMemoryVault::new("mega-stale"));
        let snapshot =
            expect_single_current(net.mega.vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .unwrap();
        stale_vault.install(snapshot);

        // First session wins.
        let winner = net
            .run_mega(
                TransactionIntent::UpdateValue {
                    linear_id: lineage,
                    new_value: 10,
                },
                net.mini.node(),
            )
            .await
            .expect("first amendment should commit");

        // Second session, built from the stale snapshot, loses at the notary.
        let stale_session = ProposerSession::new(
            net.mega.party.clone(),
            net.mega.keys.clone(),
            stale_vault,
            net.notary.clone(),
            net.distributor.clone(),
        );
        let (proposer_end, counterparty_end) =
            ac_03_commitment_session::memory_channel("MegaCorp", "MiniCorp");
        let node = Arc::new(net.mini.node());
        let server = tokio::spawn({
            let node = node.clone();
            async move { node.serve(counterparty_end).await }
        });

        let error = stale_session
            .run(
                TransactionIntent::UpdateValue {
                    linear_id: lineage,
                    new_value: 20,
                },
                vec![proposer_end],
            )
            .await
            .expect_err("the stale attempt must lose");
        server.abort();

        assert_eq!(
            error,
            SessionError::Notary(NotaryError::DoubleSpend {
                conflicting: winner.id()
            })
        );

        // The winner's state is what everyone holds.
        let entry =
            expect_single_current(net.mini.vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .unwrap();
        assert_eq!(entry.record.as_obligation().unwrap().value, 10);
    }
}
