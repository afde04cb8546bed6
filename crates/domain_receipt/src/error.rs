//! Receipt credit errors

use core_kernel::{AccountId, MinterId};
use thiserror::Error;

/// Errors that can occur in the receipt credit domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreditError {
    /// Caller does not hold the minter capability
    #[error("Unauthorized minter: {0}")]
    UnauthorizedMinter(MinterId),

    /// Burn would take the balance below zero
    #[error("Insufficient credit for {account}: balance {balance}, requested {requested}")]
    InsufficientCredit {
        account: AccountId,
        balance: u128,
        requested: u128,
    },

    /// Issuance rate must be positive
    #[error("Invalid issuance rate: {0}")]
    InvalidRate(u128),

    /// Balance or supply would overflow
    #[error("Credit balance overflow")]
    Overflow,

    /// Shared ledger lock was poisoned by a panicking holder
    #[error("Receipt ledger unavailable")]
    Unavailable,
}
