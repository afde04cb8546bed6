//! Contribution records
//!
//! One book per bill, one record per contributor. A record is the amount the
//! contributor still has at risk in the bill, plus the receipt credits those
//! contributions actually earned. Records are created on first contribution
//! and zeroed, never removed, on refund.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{AccountId, Amount, MoneyError};

/// One contributor's standing in a bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Value at risk
    pub amount: Amount,
    /// Credits minted on the attached receipt ledger for `amount`
    ///
    /// Summed per contribution, so it can be lower than `amount / rate`.
    pub credits: u128,
}

/// Per-contributor records for a single bill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBook {
    records: BTreeMap<AccountId, ContributionRecord>,
}

impl ContributionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount `account` has at risk (zero if it never contributed)
    pub fn amount_of(&self, account: &AccountId) -> Amount {
        self.records.get(account).map(|r| r.amount).unwrap_or(Amount::ZERO)
    }

    /// Credits `account` earned in this bill and has not had burned
    pub fn credits_of(&self, account: &AccountId) -> u128 {
        self.records.get(account).map(|r| r.credits).unwrap_or(0)
    }

    /// Raw record, distinguishing "never contributed" from "zeroed"
    pub fn record(&self, account: &AccountId) -> Option<ContributionRecord> {
        self.records.get(account).copied()
    }

    /// Adds `amount` to the account's record, returning the new value
    pub fn add(&mut self, account: AccountId, amount: Amount) -> Result<Amount, MoneyError> {
        let mut record = self.record(&account).unwrap_or_default();
        record.amount = record.amount.checked_add(amount)?;
        self.records.insert(account, record);
        Ok(record.amount)
    }

    /// Notes credits minted for the account's contribution
    pub fn add_credits(&mut self, account: AccountId, credits: u128) -> Result<u128, MoneyError> {
        let mut record = self.record(&account).unwrap_or_default();
        record.credits = record.credits.checked_add(credits).ok_or(MoneyError::Overflow)?;
        self.records.insert(account, record);
        Ok(record.credits)
    }

    /// Zeroes the account's record, returning what it held
    pub fn take(&mut self, account: &AccountId) -> ContributionRecord {
        match self.records.get_mut(account) {
            Some(record) => std::mem::take(record),
            None => ContributionRecord::default(),
        }
    }

    /// Forgets every credit count
    ///
    /// Called when the receipt ledger changes: credits issued on the old
    /// ledger stay there and are never burned from the new one.
    pub fn clear_credits(&mut self) {
        for record in self.records.values_mut() {
            record.credits = 0;
        }
    }

    /// Puts a record back to an earlier raw value
    pub(crate) fn restore(&mut self, account: AccountId, previous: Option<ContributionRecord>) {
        match previous {
            Some(record) => {
                self.records.insert(account, record);
            }
            None => {
                self.records.remove(&account);
            }
        }
    }

    /// Sum of all records
    pub fn total(&self) -> Result<Amount, MoneyError> {
        Amount::checked_sum(self.records.values().map(|r| r.amount))
    }

    /// Contributors with a nonzero amount, in account order
    pub fn active(&self) -> impl Iterator<Item = (AccountId, Amount)> + '_ {
        self.records
            .iter()
            .filter(|(_, record)| !record.amount.is_zero())
            .map(|(account, record)| (*account, record.amount))
    }

    /// Number of accounts that ever contributed
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
