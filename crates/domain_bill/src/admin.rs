//! Administrative controls
//!
//! A single administrator account holds authority over the ledger's
//! configuration and its escape hatches. Every operation here checks the
//! caller before anything else.

use std::sync::Arc;

use core_kernel::{AccountId, Amount};
use domain_receipt::{IssuanceRate, SharedReceiptLedger};

use crate::error::BillError;
use crate::events::BillEvent;
use crate::ledger::BillLedger;
use crate::ports::Payout;

impl BillLedger {
    pub(crate) fn ensure_administrator(&self, caller: AccountId) -> Result<(), BillError> {
        if caller != self.administrator {
            return Err(BillError::NotAdministrator(caller));
        }
        Ok(())
    }

    /// Hands administrative authority to `new_administrator`
    pub fn transfer_administration(&mut self, caller: AccountId, new_administrator: AccountId) -> Result<(), BillError> {
        self.ensure_administrator(caller)?;
        if new_administrator.is_nil() {
            return Err(BillError::invalid_input("administrator must be a non-nil account"));
        }

        self.administrator = new_administrator;
        let timestamp = self.now();
        self.publish([BillEvent::AdministrationTransferred {
            previous: caller,
            new: new_administrator,
            timestamp,
        }]);
        tracing::info!(previous = %caller, new = %new_administrator, "administration transferred");
        Ok(())
    }

    /// Attaches, swaps or (with `None`) detaches the receipt ledger
    ///
    /// Balances already issued stay on the old ledger, and later refunds
    /// only burn credits minted on the new one.
    ///
    /// # Errors
    ///
    /// `NotAdministrator`, or `UnauthorizedMinter` if the new ledger was not
    /// created with this ledger's [`minter_id`](BillLedger::minter_id)
    pub fn set_receipt_ledger(
        &mut self,
        caller: AccountId,
        receipt_ledger: Option<SharedReceiptLedger>,
    ) -> Result<(), BillError> {
        self.ensure_administrator(caller)?;
        if let Some(receipts) = &receipt_ledger {
            let minter = receipts
                .read()
                .map_err(|_| BillError::LedgerUnavailable("receipt ledger"))?
                .minter();
            if minter != self.minter_id() {
                return Err(BillError::UnauthorizedMinter(minter));
            }
        }

        let unchanged = match (&self.receipt_ledger, &receipt_ledger) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.forget_credits();
        }

        let attached = receipt_ledger.is_some();
        self.receipt_ledger = receipt_ledger;
        let timestamp = self.now();
        self.publish([BillEvent::ReceiptLedgerChanged { attached, timestamp }]);
        tracing::info!(attached, "receipt ledger changed");
        Ok(())
    }

    /// Changes the value-per-credit used for future conversions
    ///
    /// # Errors
    ///
    /// `NotAdministrator`, or `InvalidRate` for zero
    pub fn set_issuance_rate(&mut self, caller: AccountId, rate: u128) -> Result<(), BillError> {
        self.ensure_administrator(caller)?;
        let rate = IssuanceRate::new(rate)?;

        let previous = self.issuance_rate;
        self.issuance_rate = rate;
        let timestamp = self.now();
        self.publish([BillEvent::IssuanceRateChanged {
            previous: previous.value(),
            new: rate.value(),
            timestamp,
        }]);
        tracing::info!(previous = previous.value(), new = rate.value(), "issuance rate changed");
        Ok(())
    }

    /// Sweeps value the ledger holds but no bill is owed
    ///
    /// Never touches funds counted in any bill's `total_paid` or reward pool.
    ///
    /// # Errors
    ///
    /// `NotAdministrator`, `InvalidInput` (zero amount or nil recipient),
    /// `ExceedsStrayFunds`, or `TransferFailed`
    pub fn rescue_stray_funds(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<(), BillError> {
        self.ensure_administrator(caller)?;
        if amount.is_zero() {
            return Err(BillError::invalid_input("rescue amount must be positive"));
        }
        if to.is_nil() {
            return Err(BillError::invalid_input("rescue recipient must be a non-nil account"));
        }

        let available = self.stray_funds()?;
        if amount > available {
            return Err(BillError::ExceedsStrayFunds {
                requested: amount,
                available,
            });
        }

        let previous_custody = self.custody;
        self.custody = self.custody.checked_sub(amount)?;

        if let Err(e) = self.transfer.pay(&[Payout::new(to, amount)]) {
            tracing::warn!(to = %to, amount = %amount, error = %e, "stray fund rescue rolled back");
            self.custody = previous_custody;
            return Err(e.into());
        }

        let timestamp = self.now();
        self.publish([BillEvent::StrayFundsRescued { to, amount, timestamp }]);
        tracing::info!(to = %to, amount = %amount, "stray funds rescued");
        Ok(())
    }

    /// Records value that reached custody outside any operation
    ///
    /// Such value cannot be bounced, so it becomes stray and is only
    /// recoverable through [`rescue_stray_funds`](BillLedger::rescue_stray_funds).
    /// Returns the new stray balance.
    pub fn record_forced_value(&mut self, amount: Amount) -> Result<Amount, BillError> {
        self.custody = self.custody.checked_add(amount)?;
        let stray = self.stray_funds()?;
        tracing::warn!(amount = %amount, stray = %stray, "value arrived outside any operation");
        Ok(stray)
    }

    /// Refuses a blind deposit
    ///
    /// Value is only accepted through `contribute` or `seed_reward_pool`.
    /// This always fails with `UnsolicitedDeposit` and changes nothing.
    pub fn receive_unsolicited(&self, from: AccountId, amount: Amount) -> Result<(), BillError> {
        tracing::warn!(from = %from, amount = %amount, "unsolicited deposit rejected");
        Err(BillError::UnsolicitedDeposit { from, amount })
    }
}
