//! Happy paths: every proposer intent driven end to end over the in-memory
//! vault, notary, and session channels, with both parties' vaults checked
//! afterwards.

#[cfg(test)]
mod tests {
    use crate::support::TestNet;
    use ac_01_record_catalog::records::RecordKind;
    use ac_03_commitment_session::{
        expect_single_current, SessionState, SettlementShape, TransactionIntent, ValueCap,
    };
    use std::time::Duration;
    use tokio::time::timeout;

    fn state_rank(state: &SessionState) -> usize {
        match state {
            SessionState::Building => 0,
            SessionState::LocallyVerified => 1,
            SessionState::SelfSigned => 2,
            SessionState::CollectingSignatures => 3,
            SessionState::Notarizing => 4,
            SessionState::Committed => 5,
            SessionState::Failed(_) => usize::MAX,
        }
    }

    #[tokio::test]
    async fn create_flow_commits_and_distributes_to_both_vaults() {
        let net = TestNet::new();
        let finalized = net.create_obligation(90).await;

        let lineage = finalized.transaction.content.outputs[0].linear_id();
        for vault in [&net.mega.vault, &net.mini.vault] {
            let entry = expect_single_current(vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .expect("both parties should hold the new obligation");
            let obligation = entry.record.as_obligation().unwrap();
            assert_eq!(obligation.value, 90);
            assert!(!obligation.paid);
        }
        assert!(finalized.seal.verify(&finalized.id()).is_ok());
    }

    #[tokio::test]
    async fn session_checkpoints_are_observable_and_ordered() {
        let net = TestNet::new();
        let session = net.mega_session();
        let mut observer = session.observe();

        let collector = tokio::spawn(async move {
            let mut seen = vec![observer.borrow_and_update().clone()];
            while observer.changed().await.is_ok() {
                seen.push(observer.borrow_and_update().clone());
            }
            seen
        });

        let (proposer_end, counterparty_end) =
            ac_03_commitment_session::memory_channel("MegaCorp", "MiniCorp");
        let node = std::sync::Arc::new(net.mini.node());
        let server = tokio::spawn({
            let node = node.clone();
            async move { node.serve(counterparty_end).await }
        });

        session
            .run(
                TransactionIntent::CreateObligation {
                    value: 42,
                    borrower: net.mini.party.clone(),
                },
                vec![proposer_end],
            )
            .await
            .expect("flow should commit");
        server.abort();

        let seen = timeout(Duration::from_secs(5), collector)
            .await
            .expect("collector should finish")
            .expect("collector should not panic");

        assert_eq!(seen.last(), Some(&SessionState::Committed));
        // The watch channel may coalesce, but never reorders.
        let ranks: Vec<usize> = seen.iter().map(state_rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "saw {seen:?}");
    }

    #[tokio::test]
    async fn update_flow_supersedes_the_previous_version() {
        let net = TestNet::new();
        let issued = net.create_obligation(90).await;
        let lineage = issued.transaction.content.outputs[0].linear_id();
        let issued_ref = issued.transaction.output_refs()[0];

        net.run_mega(
            TransactionIntent::UpdateValue {
                linear_id: lineage,
                new_value: 42,
            },
            net.mini.node().with_policy(ValueCap(100)),
        )
        .await
        .expect("amendment should commit");

        for vault in [&net.mega.vault, &net.mini.vault] {
            assert!(vault.is_consumed(&issued_ref));
            let entry = expect_single_current(vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .expect("exactly one current version after the update");
            assert_eq!(entry.record.as_obligation().unwrap().value, 42);
        }
    }

    #[tokio::test]
    async fn settle_flow_marks_paid_and_issues_a_receipt() {
        let net = TestNet::new();
        let issued = net.create_obligation(90).await;
        let lineage = issued.transaction.content.outputs[0].linear_id();

        let settled = net
            .run_mega(
                TransactionIntent::SettleObligation { linear_id: lineage },
                net.mini.node().with_policy(SettlementShape),
            )
            .await
            .expect("settlement should commit");

        // The obligation's successor is flagged paid.
        let entry =
            expect_single_current(net.mini.vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .unwrap();
        assert!(entry.record.as_obligation().unwrap().paid);

        // The receipt back-references the settled lineage and is held by both.
        let receipt = settled.transaction.content.outputs[1].as_receipt().unwrap();
        assert_eq!(receipt.obligation_id, lineage);
        for vault in [&net.mega.vault, &net.mini.vault] {
            expect_single_current(vault.as_ref(), RecordKind::Receipt, &receipt.linear_id)
                .await
                .expect("receipt should be current in every vault");
        }
    }

    #[tokio::test]
    async fn annotate_flow_reads_without_consuming() {
        let net = TestNet::new();
        let issued = net.create_obligation(90).await;
        let lineage = issued.transaction.content.outputs[0].linear_id();
        let issued_ref = issued.transaction.output_refs()[0];

        let annotated = net
            .run_mega(
                TransactionIntent::AnnotateObligation {
                    linear_id: lineage,
                    description: "collateral reviewed".into(),
                    counterparty: net.mini.party.clone(),
                },
                net.mini.node(),
            )
            .await
            .expect("annotation should commit");

        assert_eq!(annotated.transaction.content.references.len(), 1);
        assert!(annotated.transaction.content.inputs.is_empty());

        // The referenced obligation was read, not consumed.
        for vault in [&net.mega.vault, &net.mini.vault] {
            assert!(!vault.is_consumed(&issued_ref));
            expect_single_current(vault.as_ref(), RecordKind::Obligation, &lineage)
                .await
                .expect("obligation should still be current");
        }

        let annotation = annotated.transaction.content.outputs[0]
            .as_annotation()
            .unwrap();
        assert_eq!(annotation.ref_id, lineage);
        assert_eq!(annotation.ref_kind, RecordKind::Obligation);
    }
}
