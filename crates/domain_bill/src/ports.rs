//! Bill Domain Ports
//!
//! The ledger never moves value itself. Every payout (withdrawals, refunds,
//! surplus returns, rewards, rescues) is handed to a [`ValueTransfer`]
//! adapter supplied by the collaborator layer.
//!
//! # Contract
//!
//! - One operation issues at most one [`ValueTransfer::pay`] call carrying all
//!   of its payouts.
//! - `pay` settles every payout or none of them.
//! - An error aborts the enclosing ledger operation, which restores its
//!   pre-call state.
//!
//! ```rust,ignore
//! let treasury: Arc<dyn ValueTransfer> = Arc::new(WalletAdapter::new(wallet));
//! let ledger = BillLedger::new(&config, treasury)?;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use core_kernel::{AccountId, Amount};

/// Error type for value transfers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The recipient refused the payment
    #[error("Payment of {amount} to {to} rejected: {reason}")]
    Rejected {
        to: AccountId,
        amount: Amount,
        reason: String,
    },

    /// The settlement system could not be reached
    #[error("Settlement unavailable: {0}")]
    Unavailable(String),
}

/// A single outgoing payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub to: AccountId,
    pub amount: Amount,
}

impl Payout {
    pub fn new(to: AccountId, amount: Amount) -> Self {
        Self { to, amount }
    }
}

/// Settles value leaving the ledger
pub trait ValueTransfer: Send + Sync + fmt::Debug {
    /// Pays every payout, or none of them
    fn pay(&self, payouts: &[Payout]) -> Result<(), TransferError>;
}

/// In-memory settlement for testing
///
/// Records every payout and can be told to refuse payments, which is how
/// tests exercise the ledger's rollback paths.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Debug, Default)]
    struct TreasuryState {
        received: HashMap<AccountId, Amount>,
        history: Vec<Payout>,
        settlements: usize,
        refused: HashSet<AccountId>,
        fail_next: usize,
    }

    /// Cloneable handle to a shared in-memory treasury
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryTreasury {
        state: Arc<Mutex<TreasuryState>>,
    }

    impl InMemoryTreasury {
        /// Creates a treasury that accepts every payment
        pub fn new() -> Self {
            Self::default()
        }

        fn state(&self) -> MutexGuard<'_, TreasuryState> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Refuses any settlement that pays `account`
        pub fn refuse_payments_to(&self, account: AccountId) {
            self.state().refused.insert(account);
        }

        /// Accepts payments to `account` again
        pub fn accept_payments_to(&self, account: AccountId) {
            self.state().refused.remove(&account);
        }

        /// Fails the next `count` settlements outright
        pub fn fail_next(&self, count: usize) {
            self.state().fail_next = count;
        }

        /// Total value paid to `account`
        pub fn received_by(&self, account: &AccountId) -> Amount {
            self.state().received.get(account).copied().unwrap_or(Amount::ZERO)
        }

        /// Every payout settled so far, in order
        pub fn history(&self) -> Vec<Payout> {
            self.state().history.clone()
        }

        /// Number of successful settlements
        pub fn settlements(&self) -> usize {
            self.state().settlements
        }

        /// Total value paid out
        pub fn total_paid_out(&self) -> Amount {
            self.state()
                .history
                .iter()
                .fold(Amount::ZERO, |acc, p| acc.checked_add(p.amount).unwrap_or(Amount::new(u128::MAX)))
        }
    }

    impl ValueTransfer for InMemoryTreasury {
        fn pay(&self, payouts: &[Payout]) -> Result<(), TransferError> {
            let mut state = self.state();

            if state.fail_next > 0 {
                state.fail_next -= 1;
                return Err(TransferError::Unavailable("injected failure".to_string()));
            }

            if let Some(refused) = payouts.iter().find(|p| state.refused.contains(&p.to)) {
                return Err(TransferError::Rejected {
                    to: refused.to,
                    amount: refused.amount,
                    reason: "recipient refuses payment".to_string(),
                });
            }

            let mut received = state.received.clone();
            for payout in payouts {
                let entry = received.entry(payout.to).or_insert(Amount::ZERO);
                *entry = entry
                    .checked_add(payout.amount)
                    .map_err(|e| TransferError::Unavailable(e.to_string()))?;
            }

            state.received = received;
            state.history.extend_from_slice(payouts);
            state.settlements += 1;

            Ok(())
        }
    }
}
