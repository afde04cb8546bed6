//! Thread-safe ledger handle
//!
//! [`BillLedger`] takes `&mut self` for every transition, which already
//! serializes operations within one owner. [`SharedBillLedger`] extends that
//! to many threads with one ledger-wide lock: an operation holds the lock
//! from its first check to its last effect, so two callers can never both
//! see a bill as "not yet withdrawn".

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use core_kernel::{AccountId, Amount, BillId};

use crate::bill::Bill;
use crate::error::BillError;
use crate::events::BillEvent;
use crate::ledger::{BillLedger, ContributionReceipt};

/// Cloneable handle serializing access to one ledger
#[derive(Debug, Clone)]
pub struct SharedBillLedger {
    inner: Arc<Mutex<BillLedger>>,
}

impl SharedBillLedger {
    pub fn new(ledger: BillLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Runs `operation` with exclusive access to the ledger
    ///
    /// # Errors
    ///
    /// Returns `LedgerUnavailable` if a previous holder panicked, otherwise
    /// whatever `operation` returns
    pub fn execute<R>(&self, operation: impl FnOnce(&mut BillLedger) -> Result<R, BillError>) -> Result<R, BillError> {
        let mut ledger = self
            .inner
            .lock()
            .map_err(|_| BillError::LedgerUnavailable("bill ledger"))?;
        operation(&mut ledger)
    }

    pub fn create_bill(
        &self,
        creator: AccountId,
        payee: AccountId,
        target: Amount,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<BillId, BillError> {
        self.execute(|ledger| ledger.create_bill(creator, payee, target, deadline))
    }

    pub fn contribute(&self, bill_id: BillId, contributor: AccountId, amount: Amount) -> Result<ContributionReceipt, BillError> {
        self.execute(|ledger| ledger.contribute(bill_id, contributor, amount))
    }

    pub fn withdraw(&self, bill_id: BillId, caller: AccountId) -> Result<Amount, BillError> {
        self.execute(|ledger| ledger.withdraw(bill_id, caller))
    }

    pub fn refund(&self, bill_id: BillId, caller: AccountId) -> Result<Amount, BillError> {
        self.execute(|ledger| ledger.refund(bill_id, caller))
    }

    pub fn is_funded(&self, bill_id: BillId) -> Result<bool, BillError> {
        self.execute(|ledger| ledger.is_funded(bill_id))
    }

    pub fn contributor_amount(&self, bill_id: BillId, account: AccountId) -> Result<Amount, BillError> {
        self.execute(|ledger| ledger.contributor_amount(bill_id, &account))
    }

    pub fn bill(&self, bill_id: BillId) -> Result<Bill, BillError> {
        self.execute(|ledger| ledger.bill(bill_id))
    }

    pub fn take_events(&self) -> Result<Vec<BillEvent>, BillError> {
        self.execute(|ledger| Ok(ledger.take_events()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::ports::mock::InMemoryTreasury;

    #[test]
    fn test_poisoned_lock_surfaces_as_unavailable() {
        let admin = AccountId::new();
        let ledger = BillLedger::new(&LedgerConfig::new(admin), Arc::new(InMemoryTreasury::new())).unwrap();
        let shared = SharedBillLedger::new(ledger);

        let handle = shared.clone();
        let _ = std::thread::spawn(move || {
            let _: Result<(), BillError> = handle.execute(|_| panic!("holder panicked"));
        })
        .join();

        assert_eq!(
            shared.bill(BillId::FIRST),
            Err(BillError::LedgerUnavailable("bill ledger"))
        );
    }
}
