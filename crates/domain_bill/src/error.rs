//! Bill domain errors
//!
//! Every failure is a variant of the closed [`BillError`] enum and is
//! returned to the caller of the operation that detected it.

use thiserror::Error;

use core_kernel::{AccountId, Amount, BillId, MinterId, MoneyError};
use domain_receipt::CreditError;

use crate::ports::TransferError;

/// Errors that can occur in the bill domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillError {
    /// Bad creation or constructor arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    /// The payee has already collected this bill
    #[error("Bill already withdrawn: {0}")]
    AlreadyWithdrawn(BillId),

    #[error("{caller} is not the payee of {bill_id}")]
    NotPayee {
        bill_id: BillId,
        caller: AccountId,
    },

    #[error("Bill has not reached its target: {0}")]
    NotFunded(BillId),

    /// Deadline unset or still in the future
    #[error("Refund deadline has not passed for {0}")]
    DeadlineNotPassed(BillId),

    /// Bill reached its target, so contributions are no longer refundable
    #[error("Bill is funded and cannot be refunded: {0}")]
    NotRefundable(BillId),

    #[error("{account} has no refundable contribution to {bill_id}")]
    NoContribution {
        bill_id: BillId,
        account: AccountId,
    },

    #[error("Contribution amount must be positive")]
    ZeroContribution,

    #[error("Insufficient credit for {account}: balance {balance}, requested {requested}")]
    InsufficientCredit {
        account: AccountId,
        balance: u128,
        requested: u128,
    },

    #[error("Invalid issuance rate: {0}")]
    InvalidRate(u128),

    /// The value-transfer collaborator rejected a payout
    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("{0} is not the ledger administrator")]
    NotAdministrator(AccountId),

    /// Value sent without a matching operation
    #[error("Unsolicited deposit of {amount} from {from} rejected")]
    UnsolicitedDeposit {
        from: AccountId,
        amount: Amount,
    },

    #[error("Reward pool of {0} is empty")]
    EmptyRewardPool(BillId),

    #[error("Requested {requested} exceeds stray funds of {available}")]
    ExceedsStrayFunds {
        requested: Amount,
        available: Amount,
    },

    /// Receipt ledger is bound to a different minter
    #[error("Unauthorized minter: {0}")]
    UnauthorizedMinter(MinterId),

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] MoneyError),

    /// A lock guarding shared state was poisoned
    #[error("{0} unavailable")]
    LedgerUnavailable(&'static str),
}

impl From<CreditError> for BillError {
    fn from(error: CreditError) -> Self {
        match error {
            CreditError::UnauthorizedMinter(minter) => BillError::UnauthorizedMinter(minter),
            CreditError::InsufficientCredit { account, balance, requested } => {
                BillError::InsufficientCredit { account, balance, requested }
            }
            CreditError::InvalidRate(rate) => BillError::InvalidRate(rate),
            CreditError::Overflow => BillError::Arithmetic(MoneyError::Overflow),
            CreditError::Unavailable => BillError::LedgerUnavailable("receipt ledger"),
        }
    }
}

impl BillError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        BillError::InvalidInput(message.into())
    }

    /// Returns true if the caller lacked the authority for the operation
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            BillError::NotPayee { .. } | BillError::NotAdministrator(_) | BillError::UnauthorizedMinter(_)
        )
    }
}
