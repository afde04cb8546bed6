//! Custom Test Assertions
//!
//! Provides ledger-wide checks that give more meaningful failure messages
//! than a chain of `assert_eq!`.

use core_kernel::{Amount, BillId};
use domain_bill::{BillEvent, BillLedger};

/// Asserts the accounting invariants of every bill in the ledger
///
/// - `total_paid <= target`
/// - before withdrawal, contribution records sum to `total_paid`
/// - custody covers every obligation
///
/// # Panics
///
/// Panics with the offending bill if any invariant is broken
pub fn assert_ledger_consistent(ledger: &BillLedger) {
    for bill in ledger.bills() {
        assert!(
            bill.total_paid <= bill.target,
            "{} collected {} above its target {}",
            bill.id,
            bill.total_paid,
            bill.target
        );

        if !bill.withdrawn {
            let records = ledger
                .contributors(bill.id)
                .unwrap_or_else(|e| panic!("{} has no contribution book: {e}", bill.id));
            let sum = records
                .iter()
                .fold(Amount::ZERO, |acc, (_, amount)| acc.checked_add(*amount).unwrap_or(Amount::new(u128::MAX)));
            assert_eq!(
                sum, bill.total_paid,
                "{} records sum to {} but total_paid is {}",
                bill.id, sum, bill.total_paid
            );
        }
    }

    let obligations = ledger.obligations().unwrap_or_else(|e| panic!("obligations overflowed: {e}"));
    assert!(
        ledger.custody() >= obligations,
        "custody {} does not cover obligations {}",
        ledger.custody(),
        obligations
    );
}

/// Asserts a bill reached its target and has not been collected
pub fn assert_collectable(ledger: &BillLedger, bill_id: BillId) {
    let bill = ledger
        .bill(bill_id)
        .unwrap_or_else(|e| panic!("expected {bill_id} to exist: {e}"));
    assert!(bill.is_funded(), "{bill_id} is not funded: {} of {}", bill.total_paid, bill.target);
    assert!(!bill.withdrawn, "{bill_id} was already withdrawn");
}

/// Asserts the events carry exactly the given type names, in order
pub fn assert_event_types(events: &[BillEvent], expected: &[&str]) {
    let actual: Vec<&str> = events.iter().map(BillEvent::event_type).collect();
    assert_eq!(actual, expected, "event sequence mismatch");
}
