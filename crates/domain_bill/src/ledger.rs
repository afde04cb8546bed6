//! Bill ledger implementation
//!
//! The [`BillLedger`] is the aggregate root for every bill, every
//! contribution record and the value the ledger holds in custody.
//!
//! # Transaction discipline
//!
//! Each operation either commits every effect (bill state, contribution
//! records, receipt credits, payouts, events) or none of them:
//!
//! 1. validate preconditions
//! 2. snapshot what the operation will touch
//! 3. move internal state to its post-operation value
//! 4. mint or burn receipt credits
//! 5. hand payouts to the [`ValueTransfer`] port
//! 6. publish staged events
//!
//! A failure at step 4 or 5 restores the snapshot and reverses any credit
//! change, so a rejected payout never leaves a half-applied operation behind.
//! Payouts always happen after internal state is final, so a payee cannot
//! observe a bill that is still marked collectable while being paid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use core_kernel::{AccountId, Amount, BillId, MinterId, SharedClock, SystemClock};
use domain_receipt::{IssuanceRate, SharedReceiptLedger};

use crate::bill::{Bill, BillStatus};
use crate::config::{LedgerConfig, RewardPolicy};
use crate::contribution::{ContributionBook, ContributionRecord};
use crate::error::BillError;
use crate::events::BillEvent;
use crate::ports::{Payout, ValueTransfer};

/// Outcome of a contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionReceipt {
    /// Portion credited to the bill
    pub accepted: Amount,
    /// Portion returned to the contributor
    pub surplus: Amount,
}

/// Pre-operation state restored when an operation aborts
#[derive(Debug)]
pub(crate) struct Snapshot {
    bill: Bill,
    record: Option<(AccountId, Option<ContributionRecord>)>,
    custody: Amount,
}

/// The bill ledger aggregate
///
/// # Invariants
///
/// - For every bill, `total_paid <= target`
/// - Before withdrawal, the sum of a bill's contribution records equals its
///   `total_paid`
/// - `custody >= obligations()`; the difference is stray value
/// - Bill ids are sequential and never reused
#[derive(Debug)]
pub struct BillLedger {
    bills: BTreeMap<BillId, Bill>,
    contributions: HashMap<BillId, ContributionBook>,
    next_id: BillId,
    pub(crate) administrator: AccountId,
    pub(crate) issuance_rate: IssuanceRate,
    pub(crate) reward_policy: RewardPolicy,
    pub(crate) receipt_ledger: Option<SharedReceiptLedger>,
    /// Capability presented to the receipt ledger
    minter: MinterId,
    /// Total value held on behalf of bills (plus any stray value)
    pub(crate) custody: Amount,
    pub(crate) transfer: Arc<dyn ValueTransfer>,
    clock: SharedClock,
    /// Committed events not yet taken by an observer
    events: Vec<BillEvent>,
}

impl BillLedger {
    /// Creates an empty ledger
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configured administrator is nil
    pub fn new(config: &LedgerConfig, transfer: Arc<dyn ValueTransfer>) -> Result<Self, BillError> {
        config
            .validate()
            .map_err(|e| BillError::invalid_input(e.to_string()))?;

        Ok(Self {
            bills: BTreeMap::new(),
            contributions: HashMap::new(),
            next_id: BillId::FIRST,
            administrator: config.administrator,
            issuance_rate: config.issuance_rate,
            reward_policy: config.reward_policy,
            receipt_ledger: None,
            minter: MinterId::new(),
            custody: Amount::ZERO,
            transfer,
            clock: Arc::new(SystemClock),
            events: Vec::new(),
        })
    }

    /// Replaces the wall clock used to evaluate deadlines
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Capability id a receipt ledger must be created with to accept this
    /// ledger's mint and burn calls
    pub fn minter_id(&self) -> MinterId {
        self.minter
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Opens a new bill
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `payee` is nil or `target` is zero
    pub fn create_bill(
        &mut self,
        creator: AccountId,
        payee: AccountId,
        target: Amount,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<BillId, BillError> {
        if payee.is_nil() {
            return Err(BillError::invalid_input("payee must be a non-nil account"));
        }
        if target.is_zero() {
            return Err(BillError::invalid_input("target must be positive"));
        }

        let id = self.next_id;
        let next = id
            .next()
            .ok_or_else(|| BillError::invalid_input("bill id space exhausted"))?;
        let now = self.now();

        self.bills.insert(id, Bill::new(id, creator, payee, target, deadline, now));
        self.contributions.insert(id, ContributionBook::new());
        self.next_id = next;

        self.events.push(BillEvent::BillCreated {
            bill_id: id,
            creator,
            payee,
            target,
            deadline,
            timestamp: now,
        });

        tracing::info!(bill_id = %id, creator = %creator, payee = %payee, target = %target, "bill created");
        Ok(id)
    }

    /// Adds `amount` toward a bill on behalf of `contributor`
    ///
    /// Accepts at most what the bill still needs and returns the rest to the
    /// contributor. A bill that is already funded accepts nothing.
    ///
    /// # Errors
    ///
    /// - `BillNotFound`, `ZeroContribution`, `AlreadyWithdrawn` (in that order)
    /// - `TransferFailed` if the surplus cannot be returned; nothing is kept
    pub fn contribute(
        &mut self,
        bill_id: BillId,
        contributor: AccountId,
        amount: Amount,
    ) -> Result<ContributionReceipt, BillError> {
        let bill = self.bill_ref(bill_id)?;
        if amount.is_zero() {
            return Err(BillError::ZeroContribution);
        }
        if bill.withdrawn {
            return Err(BillError::AlreadyWithdrawn(bill_id));
        }

        let accepted = amount.min(bill.remaining());
        let surplus = amount.checked_sub(accepted)?;
        let new_total_paid = bill.total_paid.checked_add(accepted)?;
        let new_custody = self.custody.checked_add(accepted)?;

        let snapshot = self.snapshot(bill_id, Some(contributor))?;
        let now = self.now();
        let mut staged = Vec::new();
        let mut minted = 0;

        if !accepted.is_zero() {
            if let Err(e) = self.book_mut(bill_id)?.add(contributor, accepted) {
                self.restore(snapshot);
                return Err(e.into());
            }
            self.bill_mut(bill_id)?.total_paid = new_total_paid;
            self.custody = new_custody;

            staged.push(BillEvent::Contributed {
                bill_id,
                contributor,
                accepted,
                new_total_paid,
                timestamp: now,
            });

            minted = match self.mint_credits(contributor, accepted) {
                Ok(minted) => minted,
                Err(e) => {
                    tracing::warn!(bill_id = %bill_id, error = %e, "contribution rolled back: credit mint failed");
                    self.restore(snapshot);
                    return Err(e);
                }
            };
            if let Err(e) = self.book_mut(bill_id)?.add_credits(contributor, minted) {
                self.revert_mint(contributor, minted);
                self.restore(snapshot);
                return Err(e.into());
            }
        }

        if !surplus.is_zero() {
            if let Err(e) = self.transfer.pay(&[Payout::new(contributor, surplus)]) {
                tracing::warn!(bill_id = %bill_id, surplus = %surplus, error = %e, "contribution rolled back: surplus return failed");
                self.revert_mint(contributor, minted);
                self.restore(snapshot);
                return Err(e.into());
            }
        }

        self.events.extend(staged);
        tracing::info!(
            bill_id = %bill_id,
            contributor = %contributor,
            accepted = %accepted,
            surplus = %surplus,
            total_paid = %new_total_paid,
            credits = minted,
            "contribution recorded"
        );

        Ok(ContributionReceipt { accepted, surplus })
    }

    /// Pays the collected total to the payee
    ///
    /// # Errors
    ///
    /// `BillNotFound`, `AlreadyWithdrawn`, `NotPayee`, `NotFunded` (checked in
    /// that order), or `TransferFailed` which leaves the bill collectable.
    pub fn withdraw(&mut self, bill_id: BillId, caller: AccountId) -> Result<Amount, BillError> {
        let bill = self.bill_ref(bill_id)?;
        if bill.withdrawn {
            return Err(BillError::AlreadyWithdrawn(bill_id));
        }
        if caller != bill.payee {
            return Err(BillError::NotPayee { bill_id, caller });
        }
        if !bill.is_funded() {
            return Err(BillError::NotFunded(bill_id));
        }

        let amount = bill.total_paid;
        let payee = bill.payee;
        let new_custody = self.custody.checked_sub(amount)?;
        let snapshot = self.snapshot(bill_id, None)?;

        {
            let bill = self.bill_mut(bill_id)?;
            bill.withdrawn = true;
            bill.total_paid = Amount::ZERO;
        }
        self.custody = new_custody;

        if let Err(e) = self.transfer.pay(&[Payout::new(payee, amount)]) {
            tracing::warn!(bill_id = %bill_id, amount = %amount, error = %e, "withdrawal rolled back");
            self.restore(snapshot);
            return Err(e.into());
        }

        self.events.push(BillEvent::Withdrawn {
            bill_id,
            payee,
            amount,
            timestamp: self.now(),
        });
        tracing::info!(bill_id = %bill_id, payee = %payee, amount = %amount, "bill withdrawn");

        Ok(amount)
    }

    /// Returns the caller's contribution after an unfunded bill's deadline
    ///
    /// # Errors
    ///
    /// `BillNotFound`, `AlreadyWithdrawn`, `DeadlineNotPassed`,
    /// `NotRefundable`, `NoContribution` (checked in that order), then
    /// `TransferFailed`, which leaves the contribution in place.
    ///
    /// Burns exactly the credits the caller's contributions earned on the
    /// attached receipt ledger, however the issuance rate has moved since.
    pub fn refund(&mut self, bill_id: BillId, caller: AccountId) -> Result<Amount, BillError> {
        let bill = self.bill_ref(bill_id)?;
        if bill.withdrawn {
            return Err(BillError::AlreadyWithdrawn(bill_id));
        }
        if !bill.deadline_passed(self.now()) {
            return Err(BillError::DeadlineNotPassed(bill_id));
        }
        if bill.is_funded() {
            return Err(BillError::NotRefundable(bill_id));
        }

        let contributed = self.book(bill_id)?.amount_of(&caller);
        if contributed.is_zero() {
            return Err(BillError::NoContribution { bill_id, account: caller });
        }

        let new_total_paid = bill.total_paid.checked_sub(contributed)?;
        let new_custody = self.custody.checked_sub(contributed)?;
        let snapshot = self.snapshot(bill_id, Some(caller))?;

        let record = self.book_mut(bill_id)?.take(&caller);
        self.bill_mut(bill_id)?.total_paid = new_total_paid;
        self.custody = new_custody;

        let burned = match self.burn_credits(caller, record.credits) {
            Ok(burned) => burned,
            Err(e) => {
                tracing::warn!(bill_id = %bill_id, error = %e, "refund rolled back: credit burn failed");
                self.restore(snapshot);
                return Err(e);
            }
        };

        if let Err(e) = self.transfer.pay(&[Payout::new(caller, contributed)]) {
            tracing::warn!(bill_id = %bill_id, amount = %contributed, error = %e, "refund rolled back: transfer failed");
            self.revert_burn(caller, burned);
            self.restore(snapshot);
            return Err(e.into());
        }

        self.events.push(BillEvent::Refunded {
            bill_id,
            contributor: caller,
            amount: contributed,
            timestamp: self.now(),
        });
        tracing::info!(bill_id = %bill_id, contributor = %caller, amount = %contributed, credits = burned, "contribution refunded");

        Ok(contributed)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// True once the bill's contributions cover its target
    pub fn is_funded(&self, bill_id: BillId) -> Result<bool, BillError> {
        Ok(self.bill_ref(bill_id)?.is_funded())
    }

    /// Amount `account` has at risk in the bill
    pub fn contributor_amount(&self, bill_id: BillId, account: &AccountId) -> Result<Amount, BillError> {
        Ok(self.book(bill_id)?.amount_of(account))
    }

    /// Snapshot of a bill
    pub fn bill(&self, bill_id: BillId) -> Result<Bill, BillError> {
        self.bill_ref(bill_id).cloned()
    }

    /// All bills in id order
    pub fn bills(&self) -> impl Iterator<Item = &Bill> {
        self.bills.values()
    }

    pub fn bill_count(&self) -> usize {
        self.bills.len()
    }

    /// Lifecycle position of a bill right now
    pub fn status(&self, bill_id: BillId) -> Result<BillStatus, BillError> {
        Ok(self.bill_ref(bill_id)?.status(self.now()))
    }

    /// Contributors with a nonzero record, in account order
    pub fn contributors(&self, bill_id: BillId) -> Result<Vec<(AccountId, Amount)>, BillError> {
        Ok(self.book(bill_id)?.active().collect())
    }

    /// Value owed to bills: every `total_paid` plus every reward pool
    pub fn obligations(&self) -> Result<Amount, BillError> {
        let mut total = Amount::ZERO;
        for bill in self.bills.values() {
            total = total.checked_add(bill.total_paid)?.checked_add(bill.reward_pool)?;
        }
        Ok(total)
    }

    /// Total value the ledger holds
    pub fn custody(&self) -> Amount {
        self.custody
    }

    /// Held value not owed to any bill
    pub fn stray_funds(&self) -> Result<Amount, BillError> {
        Ok(self.custody.saturating_sub(self.obligations()?))
    }

    pub fn administrator(&self) -> AccountId {
        self.administrator
    }

    pub fn issuance_rate(&self) -> IssuanceRate {
        self.issuance_rate
    }

    pub fn reward_policy(&self) -> RewardPolicy {
        self.reward_policy
    }

    /// Currently attached receipt ledger, if any
    pub fn receipt_ledger(&self) -> Option<SharedReceiptLedger> {
        self.receipt_ledger.clone()
    }

    /// Committed events not yet taken
    pub fn events(&self) -> &[BillEvent] {
        &self.events
    }

    /// Returns committed events and clears them
    pub fn take_events(&mut self) -> Vec<BillEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Internals shared with the reward and admin modules
    // ------------------------------------------------------------------

    pub(crate) fn bill_ref(&self, bill_id: BillId) -> Result<&Bill, BillError> {
        self.bills.get(&bill_id).ok_or(BillError::BillNotFound(bill_id))
    }

    pub(crate) fn bill_mut(&mut self, bill_id: BillId) -> Result<&mut Bill, BillError> {
        self.bills.get_mut(&bill_id).ok_or(BillError::BillNotFound(bill_id))
    }

    pub(crate) fn book(&self, bill_id: BillId) -> Result<&ContributionBook, BillError> {
        self.contributions.get(&bill_id).ok_or(BillError::BillNotFound(bill_id))
    }

    fn book_mut(&mut self, bill_id: BillId) -> Result<&mut ContributionBook, BillError> {
        self.contributions.get_mut(&bill_id).ok_or(BillError::BillNotFound(bill_id))
    }

    pub(crate) fn publish(&mut self, events: impl IntoIterator<Item = BillEvent>) {
        self.events.extend(events);
    }

    pub(crate) fn snapshot(&self, bill_id: BillId, account: Option<AccountId>) -> Result<Snapshot, BillError> {
        let bill = self.bill_ref(bill_id)?.clone();
        let record = match account {
            Some(account) => Some((account, self.book(bill_id)?.record(&account))),
            None => None,
        };
        Ok(Snapshot {
            bill,
            record,
            custody: self.custody,
        })
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        let bill_id = snapshot.bill.id;
        if let Some((account, previous)) = snapshot.record {
            if let Some(book) = self.contributions.get_mut(&bill_id) {
                book.restore(account, previous);
            }
        }
        self.bills.insert(bill_id, snapshot.bill);
        self.custody = snapshot.custody;
    }

    /// Mints credits for an accepted contribution, returning how many
    fn mint_credits(&self, account: AccountId, accepted: Amount) -> Result<u128, BillError> {
        let Some(receipts) = &self.receipt_ledger else {
            return Ok(0);
        };
        let credits = self.issuance_rate.credits_for(accepted);
        if credits == 0 {
            tracing::debug!(account = %account, accepted = %accepted, "contribution below issuance rate, no credit minted");
            return Ok(0);
        }
        receipts
            .write()
            .map_err(|_| BillError::LedgerUnavailable("receipt ledger"))?
            .mint(self.minter, account, credits)?;
        Ok(credits)
    }

    /// Burns the credits recorded for a refunded contribution, returning how many
    fn burn_credits(&self, account: AccountId, credits: u128) -> Result<u128, BillError> {
        if credits == 0 || self.receipt_ledger.is_none() {
            return Ok(0);
        }
        self.burn_exact(account, credits)?;
        Ok(credits)
    }

    /// Drops every recorded credit count after the receipt ledger changes
    pub(crate) fn forget_credits(&mut self) {
        for book in self.contributions.values_mut() {
            book.clear_credits();
        }
    }

    fn revert_mint(&self, account: AccountId, credits: u128) {
        if credits == 0 {
            return;
        }
        if let Err(e) = self.burn_exact(account, credits) {
            tracing::error!(account = %account, credits, error = %e, "failed to reverse credit mint");
        }
    }

    fn revert_burn(&self, account: AccountId, credits: u128) {
        if credits == 0 {
            return;
        }
        let result = match &self.receipt_ledger {
            Some(receipts) => receipts
                .write()
                .map_err(|_| BillError::LedgerUnavailable("receipt ledger"))
                .and_then(|mut ledger| ledger.mint(self.minter, account, credits).map_err(BillError::from)),
            None => Ok(()),
        };
        if let Err(e) = result {
            tracing::error!(account = %account, credits, error = %e, "failed to reverse credit burn");
        }
    }

    fn burn_exact(&self, account: AccountId, credits: u128) -> Result<(), BillError> {
        match &self.receipt_ledger {
            Some(receipts) => receipts
                .write()
                .map_err(|_| BillError::LedgerUnavailable("receipt ledger"))?
                .burn(self.minter, account, credits)
                .map_err(BillError::from),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::InMemoryTreasury;
    use chrono::Duration;
    use core_kernel::{Clock, ManualClock};
    use domain_receipt::{shared, ReceiptLedger};

    struct Fixture {
        ledger: BillLedger,
        treasury: InMemoryTreasury,
        clock: ManualClock,
        admin: AccountId,
        payee: AccountId,
    }

    fn fixture() -> Fixture {
        let admin = AccountId::new();
        let treasury = InMemoryTreasury::new();
        let clock = ManualClock::starting_now();
        let ledger = BillLedger::new(&LedgerConfig::new(admin), Arc::new(treasury.clone()))
            .unwrap()
            .with_clock(Arc::new(clock.clone()));
        Fixture {
            ledger,
            treasury,
            clock,
            admin,
            payee: AccountId::new(),
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut f = fixture();
        let first = f.ledger.create_bill(f.admin, f.payee, Amount::new(10), None).unwrap();
        let second = f.ledger.create_bill(f.admin, f.payee, Amount::new(10), None).unwrap();

        assert_eq!(first, BillId::new(1));
        assert_eq!(second, BillId::new(2));
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let mut f = fixture();
        let nil_payee = f.ledger.create_bill(f.admin, AccountId::nil(), Amount::new(10), None);
        let zero_target = f.ledger.create_bill(f.admin, f.payee, Amount::ZERO, None);

        assert!(matches!(nil_payee, Err(BillError::InvalidInput(_))));
        assert!(matches!(zero_target, Err(BillError::InvalidInput(_))));
        assert_eq!(f.ledger.bill_count(), 0);
    }

    #[test]
    fn test_overfunding_returns_surplus() {
        let mut f = fixture();
        let id = f.ledger.create_bill(f.admin, f.payee, Amount::new(1000), None).unwrap();
        let alice = AccountId::new();

        let first = f.ledger.contribute(id, alice, Amount::new(300)).unwrap();
        let second = f.ledger.contribute(id, alice, Amount::new(800)).unwrap();

        assert_eq!(first, ContributionReceipt { accepted: Amount::new(300), surplus: Amount::ZERO });
        assert_eq!(second, ContributionReceipt { accepted: Amount::new(700), surplus: Amount::new(100) });
        assert!(f.ledger.is_funded(id).unwrap());
        assert_eq!(f.treasury.received_by(&alice), Amount::new(100));
        assert_eq!(f.ledger.custody(), Amount::new(1000));
    }

    #[test]
    fn test_failed_surplus_return_rolls_back_everything() {
        let mut f = fixture();
        let id = f.ledger.create_bill(f.admin, f.payee, Amount::new(100), None).unwrap();
        let alice = AccountId::new();
        f.ledger.take_events();
        f.treasury.refuse_payments_to(alice);

        let result = f.ledger.contribute(id, alice, Amount::new(150));

        assert!(matches!(result, Err(BillError::TransferFailed(_))));
        assert_eq!(f.ledger.bill(id).unwrap().total_paid, Amount::ZERO);
        assert_eq!(f.ledger.book(id).unwrap().record(&alice), None);
        assert_eq!(f.ledger.custody(), Amount::ZERO);
        assert!(f.ledger.events().is_empty());
    }

    #[test]
    fn test_failed_withdraw_keeps_bill_collectable() {
        let mut f = fixture();
        let id = f.ledger.create_bill(f.admin, f.payee, Amount::new(100), None).unwrap();
        f.ledger.contribute(id, AccountId::new(), Amount::new(100)).unwrap();
        f.treasury.fail_next(1);

        assert!(matches!(f.ledger.withdraw(id, f.payee), Err(BillError::TransferFailed(_))));
        let bill = f.ledger.bill(id).unwrap();
        assert!(!bill.withdrawn);
        assert_eq!(bill.total_paid, Amount::new(100));

        assert_eq!(f.ledger.withdraw(id, f.payee).unwrap(), Amount::new(100));
    }

    #[test]
    fn test_refund_burns_credits() {
        let mut f = fixture();
        let receipts = shared(ReceiptLedger::new(f.ledger.minter_id()));
        f.ledger.set_receipt_ledger(f.admin, Some(receipts.clone())).unwrap();
        let deadline = f.clock.now() + Duration::hours(1);
        let id = f.ledger.create_bill(f.admin, f.payee, Amount::new(1000), Some(deadline)).unwrap();
        let alice = AccountId::new();

        f.ledger.contribute(id, alice, Amount::new(400)).unwrap();
        assert_eq!(receipts.read().unwrap().balance_of(&alice), 400);

        f.clock.advance(Duration::hours(2));
        assert_eq!(f.ledger.refund(id, alice).unwrap(), Amount::new(400));
        assert_eq!(receipts.read().unwrap().balance_of(&alice), 0);
    }

    #[test]
    fn test_refund_burns_what_repeat_contributions_minted() {
        let mut f = fixture();
        f.ledger.set_issuance_rate(f.admin, 100).unwrap();
        let receipts = shared(ReceiptLedger::new(f.ledger.minter_id()));
        f.ledger.set_receipt_ledger(f.admin, Some(receipts.clone())).unwrap();
        let deadline = f.clock.now() + Duration::hours(1);
        let id = f.ledger.create_bill(f.admin, f.payee, Amount::new(1000), Some(deadline)).unwrap();
        let alice = AccountId::new();

        f.ledger.contribute(id, alice, Amount::new(150)).unwrap();
        f.ledger.contribute(id, alice, Amount::new(150)).unwrap();
        assert_eq!(receipts.read().unwrap().balance_of(&alice), 2);
        assert_eq!(f.ledger.book(id).unwrap().credits_of(&alice), 2);

        f.clock.advance(Duration::hours(2));
        assert_eq!(f.ledger.refund(id, alice).unwrap(), Amount::new(300));
        assert_eq!(receipts.read().unwrap().balance_of(&alice), 0);
        assert_eq!(receipts.read().unwrap().total_supply(), 0);
    }

    #[test]
    fn test_failed_refund_restores_credits_and_record() {
        let mut f = fixture();
        let receipts = shared(ReceiptLedger::new(f.ledger.minter_id()));
        f.ledger.set_receipt_ledger(f.admin, Some(receipts.clone())).unwrap();
        let deadline = f.clock.now() + Duration::hours(1);
        let id = f.ledger.create_bill(f.admin, f.payee, Amount::new(1000), Some(deadline)).unwrap();
        let alice = AccountId::new();
        f.ledger.contribute(id, alice, Amount::new(400)).unwrap();
        f.clock.advance(Duration::hours(2));
        f.treasury.refuse_payments_to(alice);

        assert!(matches!(f.ledger.refund(id, alice), Err(BillError::TransferFailed(_))));
        assert_eq!(f.ledger.contributor_amount(id, &alice).unwrap(), Amount::new(400));
        assert_eq!(f.ledger.bill(id).unwrap().total_paid, Amount::new(400));
        assert_eq!(receipts.read().unwrap().balance_of(&alice), 400);
        assert_eq!(f.ledger.book(id).unwrap().credits_of(&alice), 400);
    }
}
