//! Core Kernel - Foundational types shared by the bill ledger crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Integer amounts in the smallest indivisible unit of value
//! - Strongly-typed identifiers for accounts and bills
//! - A clock port so deadlines can be evaluated against controllable time

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Amount, MoneyError};
pub use temporal::{Clock, SystemClock, ManualClock, SharedClock};
pub use identifiers::{AccountId, BillId, MinterId};
pub use error::CoreError;
