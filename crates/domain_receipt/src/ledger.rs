//! Receipt credit balances
//!
//! Balances only move through [`ReceiptLedger::mint`] and
//! [`ReceiptLedger::burn`], and both require the caller to present the
//! [`MinterId`] the ledger was created with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use core_kernel::{AccountId, MinterId};
use crate::error::CreditError;

/// Receipt ledger handle shared with (and swappable by) the bill ledger
pub type SharedReceiptLedger = Arc<RwLock<ReceiptLedger>>;

/// Wraps a receipt ledger for sharing
pub fn shared(ledger: ReceiptLedger) -> SharedReceiptLedger {
    Arc::new(RwLock::new(ledger))
}

/// Per-account credit balances
///
/// # Invariants
///
/// - `total_supply` equals the sum of all balances
/// - No balance is ever negative: a burn above the balance fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLedger {
    /// The only caller allowed to mint or burn
    minter: MinterId,
    balances: HashMap<AccountId, u128>,
    total_supply: u128,
}

impl ReceiptLedger {
    /// Creates an empty ledger controlled by `minter`
    pub fn new(minter: MinterId) -> Self {
        Self {
            minter,
            balances: HashMap::new(),
            total_supply: 0,
        }
    }

    /// Returns the capability id allowed to mint and burn
    pub fn minter(&self) -> MinterId {
        self.minter
    }

    /// Returns an account's balance (zero if it never held credit)
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Issues `amount` credits to `account`
    ///
    /// # Errors
    ///
    /// - `UnauthorizedMinter` if `caller` is not the stored minter
    /// - `Overflow` if the balance or supply would overflow
    pub fn mint(&mut self, caller: MinterId, account: AccountId, amount: u128) -> Result<(), CreditError> {
        self.authorize(caller)?;
        if amount == 0 {
            tracing::debug!(account = %account, "zero mint skipped");
            return Ok(());
        }

        let balance = self.balance_of(&account);
        let new_balance = balance.checked_add(amount).ok_or(CreditError::Overflow)?;
        let new_supply = self.total_supply.checked_add(amount).ok_or(CreditError::Overflow)?;

        self.balances.insert(account, new_balance);
        self.total_supply = new_supply;

        tracing::debug!(account = %account, amount, balance = new_balance, "receipt credit minted");
        Ok(())
    }

    /// Destroys `amount` credits held by `account`
    ///
    /// # Errors
    ///
    /// - `UnauthorizedMinter` if `caller` is not the stored minter
    /// - `InsufficientCredit` if the account holds fewer than `amount` credits
    pub fn burn(&mut self, caller: MinterId, account: AccountId, amount: u128) -> Result<(), CreditError> {
        self.authorize(caller)?;
        if amount == 0 {
            return Ok(());
        }

        let balance = self.balance_of(&account);
        if balance < amount {
            return Err(CreditError::InsufficientCredit {
                account,
                balance,
                requested: amount,
            });
        }

        self.balances.insert(account, balance - amount);
        // supply >= any single balance, so this cannot underflow
        self.total_supply -= amount;

        tracing::debug!(account = %account, amount, balance = balance - amount, "receipt credit burned");
        Ok(())
    }

    fn authorize(&self, caller: MinterId) -> Result<(), CreditError> {
        if caller != self.minter {
            return Err(CreditError::UnauthorizedMinter(caller));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_and_burn() {
        let minter = MinterId::new();
        let mut ledger = ReceiptLedger::new(minter);
        let account = AccountId::new();

        ledger.mint(minter, account, 40).unwrap();
        ledger.burn(minter, account, 15).unwrap();

        assert_eq!(ledger.balance_of(&account), 25);
        assert_eq!(ledger.total_supply(), 25);
    }

    #[test]
    fn test_foreign_minter_rejected() {
        let mut ledger = ReceiptLedger::new(MinterId::new());
        let intruder = MinterId::new();

        let result = ledger.mint(intruder, AccountId::new(), 10);

        assert_eq!(result, Err(CreditError::UnauthorizedMinter(intruder)));
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_burn_above_balance_fails() {
        let minter = MinterId::new();
        let mut ledger = ReceiptLedger::new(minter);
        let account = AccountId::new();
        ledger.mint(minter, account, 5).unwrap();

        let result = ledger.burn(minter, account, 6);

        assert!(matches!(result, Err(CreditError::InsufficientCredit { balance: 5, requested: 6, .. })));
        assert_eq!(ledger.balance_of(&account), 5);
    }

    #[test]
    fn test_zero_mint_creates_no_entry() {
        let minter = MinterId::new();
        let mut ledger = ReceiptLedger::new(minter);
        let account = AccountId::new();

        ledger.mint(minter, account, 0).unwrap();

        assert!(ledger.balances.is_empty());
    }
}
