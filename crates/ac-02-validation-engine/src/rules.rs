//! # Rule Families
//!
//! One function per rule family, plus the cross-kind settlement rule. Each
//! function checks every clause of its family against the whole transaction;
//! the first failing clause rejects everything.
//!
//! Clause wording is deliberately specific: the message is what a caller uses
//! to rebuild a corrected transaction.

use crate::errors::ValidationError;
use ac_01_record_catalog::compare::{equal_except_paid, equal_except_value};
use ac_01_record_catalog::records::{ObligationRecord, RecordKind, ReceiptRecord};
use ac_01_record_catalog::transaction::ProposedTransaction;
use shared_types::PublicKey;
use std::collections::BTreeSet;

fn require(
    condition: bool,
    rule: &'static str,
    message: &str,
) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::rule(rule, message))
    }
}

fn covers(signers: &BTreeSet<PublicKey>, keys: impl IntoIterator<Item = PublicKey>) -> bool {
    keys.into_iter().all(|key| signers.contains(&key))
}

/// Exactly one obligation consumed and one produced, with role and signer
/// clauses shared by the update and mark-paid families.
fn single_obligation_transition<'tx>(
    rule: &'static str,
    tx: &'tx ProposedTransaction,
    signers: &BTreeSet<PublicKey>,
) -> Result<(&'tx ObligationRecord, &'tx ObligationRecord), ValidationError> {
    require(
        !tx.inputs.is_empty(),
        rule,
        "must have inputs consumed when amending an obligation",
    )?;
    require(
        !tx.outputs.is_empty(),
        rule,
        "must have outputs produced when amending an obligation",
    )?;

    let inputs = tx.inputs_of(RecordKind::Obligation);
    require(
        inputs.len() == 1,
        rule,
        "only one input obligation should be consumed",
    )?;
    let outputs = tx.outputs_of(RecordKind::Obligation);
    require(
        outputs.len() == 1,
        rule,
        "only one output obligation should be produced",
    )?;

    // Kind filtering guarantees these projections.
    let input = inputs[0]
        .record
        .as_obligation()
        .ok_or_else(|| ValidationError::rule(rule, "input is not an obligation"))?;
    let output = outputs[0]
        .as_obligation()
        .ok_or_else(|| ValidationError::rule(rule, "output is not an obligation"))?;

    require(
        output.lender != output.borrower,
        rule,
        "the lender and the borrower cannot be the same entity",
    )?;

    let involved: BTreeSet<PublicKey> = [
        input.lender.key,
        input.borrower.key,
        output.lender.key,
        output.borrower.key,
    ]
    .into_iter()
    .collect();
    require(
        covers(signers, involved),
        rule,
        "all of the participants must be signers",
    )?;

    Ok((input, output))
}

/// Create family: issue a new obligation.
pub fn verify_obligation_create(
    tx: &ProposedTransaction,
    signers: &BTreeSet<PublicKey>,
) -> Result<(), ValidationError> {
    const RULE: &str = "obligation.create";

    require(
        tx.inputs_of(RecordKind::Obligation).is_empty(),
        RULE,
        "no inputs should be consumed when issuing an obligation",
    )?;
    let outputs = tx.outputs_of(RecordKind::Obligation);
    require(
        outputs.len() == 1,
        RULE,
        "only one output obligation should be created",
    )?;

    let out = outputs[0]
        .as_obligation()
        .ok_or_else(|| ValidationError::rule(RULE, "output is not an obligation"))?;
    require(
        out.lender != out.borrower,
        RULE,
        "the lender and the borrower cannot be the same entity",
    )?;
    require(
        covers(signers, [out.lender.key, out.borrower.key]),
        RULE,
        "all of the participants must be signers",
    )?;
    require(
        out.value > 0,
        RULE,
        "the obligation's value must be non-negative",
    )?;

    Ok(())
}

/// Update family: the single mutable field is `value`.
pub fn verify_obligation_update(
    tx: &ProposedTransaction,
    signers: &BTreeSet<PublicKey>,
) -> Result<(), ValidationError> {
    const RULE: &str = "obligation.update-value";

    let (input, output) = single_obligation_transition(RULE, tx, signers)?;

    require(
        equal_except_value(input, output),
        RULE,
        "only the value may change",
    )?;
    require(
        output.value > 0,
        RULE,
        "the obligation's value must be non-negative",
    )?;

    Ok(())
}

/// Flag-toggle family: the single mutable field is `paid`.
pub fn verify_obligation_paid(
    tx: &ProposedTransaction,
    signers: &BTreeSet<PublicKey>,
) -> Result<(), ValidationError> {
    const RULE: &str = "obligation.mark-paid";

    let (input, output) = single_obligation_transition(RULE, tx, signers)?;

    require(
        equal_except_paid(input, output),
        RULE,
        "only the paid flag may change",
    )?;

    Ok(())
}

/// Derivative-create family: issue a settlement receipt.
pub fn verify_receipt_create(
    tx: &ProposedTransaction,
    signers: &BTreeSet<PublicKey>,
) -> Result<(), ValidationError> {
    const RULE: &str = "receipt.create";

    require(
        tx.inputs_of(RecordKind::Receipt).is_empty(),
        RULE,
        "no receipt inputs should be consumed when issuing a receipt",
    )?;
    let outputs = tx.outputs_of(RecordKind::Receipt);
    require(
        outputs.len() == 1,
        RULE,
        "only one output receipt should be created",
    )?;

    let out = outputs[0]
        .as_receipt()
        .ok_or_else(|| ValidationError::rule(RULE, "output is not a receipt"))?;
    require(
        out.lender != out.borrower,
        RULE,
        "the lender and the borrower cannot be the same entity",
    )?;
    require(
        covers(signers, [out.lender.key, out.borrower.key]),
        RULE,
        "all of the participants must be signers",
    )?;

    Ok(())
}

/// Reference-create family: issue an annotation against a read-only reference.
pub fn verify_annotation_create(
    tx: &ProposedTransaction,
    signers: &BTreeSet<PublicKey>,
) -> Result<(), ValidationError> {
    const RULE: &str = "annotation.create";

    require(
        tx.inputs_of(RecordKind::Annotation).is_empty(),
        RULE,
        "no inputs should be consumed when issuing an annotation",
    )?;
    let outputs = tx.outputs_of(RecordKind::Annotation);
    require(
        outputs.len() == 1,
        RULE,
        "only one output annotation should be created",
    )?;
    require(
        tx.references.len() == 1 && tx.references_of(RecordKind::Obligation).len() == 1,
        RULE,
        "must reference exactly one obligation",
    )?;

    let out = outputs[0]
        .as_annotation()
        .ok_or_else(|| ValidationError::rule(RULE, "output is not an annotation"))?;
    require(
        out.lender != out.borrower,
        RULE,
        "the lender and the borrower cannot be the same entity",
    )?;
    require(
        covers(signers, [out.lender.key, out.borrower.key]),
        RULE,
        "all of the participants must be signers",
    )?;

    Ok(())
}

/// Cross-kind rule for joint settlements: when one transaction both marks an
/// obligation paid and creates a receipt, the receipt must point back at the
/// settled lineage and inherit its parties unchanged.
pub fn verify_settlement_link(tx: &ProposedTransaction) -> Result<(), ValidationError> {
    const RULE: &str = "settlement.link";

    let origin: Option<&ObligationRecord> = tx
        .inputs_of(RecordKind::Obligation)
        .first()
        .and_then(|entry| entry.record.as_obligation());
    let receipt: Option<&ReceiptRecord> = tx
        .outputs_of(RecordKind::Receipt)
        .first()
        .and_then(|record| record.as_receipt());

    let (origin, receipt) = match (origin, receipt) {
        (Some(origin), Some(receipt)) => (origin, receipt),
        _ => {
            return Err(ValidationError::rule(
                RULE,
                "a joint settlement must consume an obligation and produce a receipt",
            ))
        }
    };

    require(
        receipt.obligation_id == origin.linear_id,
        RULE,
        "the receipt must reference the settled obligation's lineage",
    )?;
    require(
        receipt.lender == origin.lender && receipt.borrower == origin.borrower,
        RULE,
        "the receipt must inherit the obligation's lender and borrower",
    )?;

    Ok(())
}
