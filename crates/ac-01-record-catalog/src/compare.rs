//! # Per-Field Comparators
//!
//! The Update and MarkPaid rule families require "output equals input in
//! every field except the one mutable field". These comparisons are written
//! field by field so that an unexpected extra mutation is always caught, and
//! so that adding a field to `ObligationRecord` breaks compilation here until
//! the comparator accounts for it.

use crate::records::ObligationRecord;

/// Equality on every obligation field except `value`.
pub fn equal_except_value(input: &ObligationRecord, output: &ObligationRecord) -> bool {
    let ObligationRecord {
        value: _,
        paid,
        lender,
        borrower,
        linear_id,
    } = input;

    *paid == output.paid
        && *lender == output.lender
        && *borrower == output.borrower
        && *linear_id == output.linear_id
}

/// Equality on every obligation field except `paid`.
pub fn equal_except_paid(input: &ObligationRecord, output: &ObligationRecord) -> bool {
    let ObligationRecord {
        value,
        paid: _,
        lender,
        borrower,
        linear_id,
    } = input;

    *value == output.value
        && *lender == output.lender
        && *borrower == output.borrower
        && *linear_id == output.linear_id
}
