//! Test Data Builders
//!
//! [`TestLedgerBuilder`] wires a [`BillLedger`] to an in-memory treasury and
//! a manual clock, and hands back handles to both so tests can inject
//! failures and move time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use core_kernel::{AccountId, ManualClock};
use domain_bill::ports::mock::InMemoryTreasury;
use domain_bill::{BillLedger, LedgerConfig, RewardPolicy, SharedBillLedger};
use domain_receipt::{shared, IssuanceRate, ReceiptLedger, SharedReceiptLedger};

use crate::fixtures::TemporalFixtures;

/// A ledger together with its collaborators
#[derive(Debug)]
pub struct TestLedger {
    pub ledger: BillLedger,
    pub treasury: InMemoryTreasury,
    pub clock: ManualClock,
    pub receipts: Option<SharedReceiptLedger>,
    pub administrator: AccountId,
}

impl TestLedger {
    /// Receipt balance of `account`, zero when no receipt ledger is attached
    pub fn credits_of(&self, account: &AccountId) -> u128 {
        self.receipts
            .as_ref()
            .and_then(|receipts| receipts.read().ok().map(|ledger| ledger.balance_of(account)))
            .unwrap_or(0)
    }

    /// Moves the ledger behind a shared handle
    pub fn into_shared(self) -> (SharedBillLedger, InMemoryTreasury, ManualClock) {
        (SharedBillLedger::new(self.ledger), self.treasury, self.clock)
    }
}

/// Builder for constructing a test ledger
pub struct TestLedgerBuilder {
    administrator: AccountId,
    issuance_rate: IssuanceRate,
    reward_policy: RewardPolicy,
    start: DateTime<Utc>,
    with_receipts: bool,
}

impl Default for TestLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedgerBuilder {
    /// Creates a builder with a fresh administrator and no receipt ledger
    pub fn new() -> Self {
        Self {
            administrator: AccountId::new(),
            issuance_rate: IssuanceRate::ONE,
            reward_policy: RewardPolicy::Administrator,
            start: TemporalFixtures::epoch(),
            with_receipts: false,
        }
    }

    pub fn with_administrator(mut self, administrator: AccountId) -> Self {
        self.administrator = administrator;
        self
    }

    pub fn with_issuance_rate(mut self, rate: IssuanceRate) -> Self {
        self.issuance_rate = rate;
        self
    }

    pub fn with_reward_policy(mut self, policy: RewardPolicy) -> Self {
        self.reward_policy = policy;
        self
    }

    /// Sets the instant the manual clock starts at
    pub fn starting_at(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }

    /// Attaches a receipt ledger bound to the new bill ledger's minter
    pub fn with_receipts(mut self) -> Self {
        self.with_receipts = true;
        self
    }

    /// Builds the ledger
    ///
    /// Events raised during setup are discarded.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected
    pub fn build(self) -> TestLedger {
        let treasury = InMemoryTreasury::new();
        let clock = ManualClock::new(self.start);
        let config = LedgerConfig::new(self.administrator)
            .with_issuance_rate(self.issuance_rate)
            .with_reward_policy(self.reward_policy);

        let mut ledger = BillLedger::new(&config, Arc::new(treasury.clone()))
            .expect("test ledger configuration should be valid")
            .with_clock(Arc::new(clock.clone()));

        let receipts = if self.with_receipts {
            let receipts = shared(ReceiptLedger::new(ledger.minter_id()));
            ledger
                .set_receipt_ledger(self.administrator, Some(receipts.clone()))
                .expect("receipt ledger should attach");
            Some(receipts)
        } else {
            None
        };
        ledger.take_events();

        TestLedger {
            ledger,
            treasury,
            clock,
            receipts,
            administrator: self.administrator,
        }
    }
}
