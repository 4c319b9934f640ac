//! Failure semantics: every refusal path is terminal for the attempt and
//! leaves no partial mutation in any vault.

#[cfg(test)]
mod tests {
    use crate::support::TestNet;
    use ac_02_validation_engine::ValidationError;
    use ac_03_commitment_session::{
        memory_channel, SessionConfig, SessionError, SessionState, TransactionIntent, ValueCap,
        VaultError,
    };
    use shared_types::LinearId;
    use std::time::Duration;

    #[tokio::test]
    async fn counterparty_value_cap_aborts_the_whole_session() {
        let net = TestNet::new();
        let error = net
            .run_mega(
                TransactionIntent::CreateObligation {
                    value: 250,
                    borrower: net.mini.party.clone(),
                },
                net.mini.node().with_policy(ValueCap(100)),
            )
            .await
            .expect_err("the cap should sink the attempt");

        match error {
            SessionError::CounterpartyAbort { party, reason } => {
                assert_eq!(party, "MiniCorp");
                assert!(reason.contains("value over 100"), "reason was {reason:?}");
            }
            other => panic!("expected a counterparty abort, got {other}"),
        }
        assert_eq!(net.mega.vault.current_count(), 0);
        assert_eq!(net.mini.vault.current_count(), 0);
    }

    #[tokio::test]
    async fn unresponsive_counterparty_times_out_with_no_mutation() {
        let net = TestNet::new();
        let session = net.mega_session().with_config(SessionConfig {
            collect_timeout: Duration::from_millis(50),
            notary_timeout: Duration::from_secs(1),
        });
        let observer = session.observe();

        // The counterparty end exists but nobody serves it.
        let (proposer_end, _counterparty_end) = memory_channel("MegaCorp", "MiniCorp");

        let error = session
            .run(
                TransactionIntent::CreateObligation {
                    value: 10,
                    borrower: net.mini.party.clone(),
                },
                vec![proposer_end],
            )
            .await
            .expect_err("silence must not commit anything");

        assert_eq!(
            error,
            SessionError::Timeout {
                stage: "collecting-signatures"
            }
        );
        assert!(matches!(*observer.borrow(), SessionState::Failed(_)));
        assert_eq!(net.mega.vault.current_count(), 0);
        assert_eq!(net.mini.vault.current_count(), 0);
    }

    #[tokio::test]
    async fn local_validation_rejects_before_any_network_interaction() {
        let net = TestNet::new();
        // No counterparty endpoints at all: a validation reject never needs one.
        let error = net
            .mega_session()
            .run(
                TransactionIntent::CreateObligation {
                    value: -1,
                    borrower: net.mini.party.clone(),
                },
                vec![],
            )
            .await
            .expect_err("negative value must be rejected locally");

        match error {
            SessionError::Validation(ValidationError::Rule { message, .. }) => {
                assert!(message.contains("value must be non-negative"));
            }
            other => panic!("expected a validation reject, got {other}"),
        }
    }

    #[tokio::test]
    async fn self_dealing_is_rejected_locally() {
        let net = TestNet::new();
        let error = net
            .mega_session()
            .run(
                TransactionIntent::CreateObligation {
                    value: 10,
                    borrower: net.mega.party.clone(),
                },
                vec![],
            )
            .await
            .expect_err("lender and borrower must differ");

        assert!(matches!(error, SessionError::Validation(_)));
        assert!(error.to_string().contains("cannot be the same entity"));
    }

    #[tokio::test]
    async fn missing_counterparty_signature_never_reaches_the_notary() {
        let net = TestNet::new();
        // Valid transaction, but no channel to the borrower: its signature
        // can never arrive, and a partially signed transaction must not move.
        let error = net
            .mega_session()
            .run(
                TransactionIntent::CreateObligation {
                    value: 10,
                    borrower: net.mini.party.clone(),
                },
                vec![],
            )
            .await
            .expect_err("incomplete signatures must fail the attempt");

        assert_eq!(
            error,
            SessionError::MissingSigner {
                key: net.mini.party.key
            }
        );
        assert_eq!(net.mega.vault.current_count(), 0);
    }

    #[tokio::test]
    async fn amending_an_unknown_lineage_reports_not_found() {
        let net = TestNet::new();
        let unknown = LinearId::new();
        let error = net
            .run_mega(
                TransactionIntent::UpdateValue {
                    linear_id: unknown,
                    new_value: 5,
                },
                net.mini.node(),
            )
            .await
            .expect_err("nothing to amend");

        match error {
            SessionError::Vault(VaultError::NotFound { linear_id, .. }) => {
                assert_eq!(linear_id, unknown);
            }
            other => panic!("expected a vault miss, got {other}"),
        }
    }
}
