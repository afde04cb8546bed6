//! Bill Domain - Collaborative Funding Ledger
//!
//! This crate implements the bill ledger: participants open bills with a
//! funding target and optional deadline, contributors add value toward them,
//! the payee collects once the target is reached, and contributors reclaim
//! their value if the deadline passes first.
//!
//! # Lifecycle
//!
//! ```text
//!            contribute (partial)
//!               ┌──────┐
//!               ▼      │
//! create ──▶  Open ────┘ ──contribute (reaches target)──▶ Funded ──withdraw──▶ Withdrawn
//!               │
//!               └──deadline passes──▶ Expired ──refund (per contributor)
//! ```
//!
//! # Collaborators
//!
//! - [`ValueTransfer`](ports::ValueTransfer): settles every payout
//! - [`ReceiptLedger`](domain_receipt::ReceiptLedger): optional proof-of-contribution credits
//! - [`Clock`](core_kernel::Clock): source of "now" for deadlines
//!
//! # Example
//!
//! ```rust,ignore
//! let mut ledger = BillLedger::new(&LedgerConfig::new(admin), treasury)?;
//!
//! let bill = ledger.create_bill(creator, payee, Amount::new(1_000), None)?;
//! let receipt = ledger.contribute(bill, alice, Amount::new(1_200))?;
//! assert_eq!(receipt.surplus, Amount::new(200));
//!
//! ledger.withdraw(bill, payee)?;
//! ```

pub mod ledger;
pub mod bill;
pub mod contribution;
pub mod reward;
pub mod admin;
pub mod shared;
pub mod events;
pub mod ports;
pub mod config;
pub mod error;

pub use crate::ledger::{BillLedger, ContributionReceipt};
pub use crate::bill::{Bill, BillStatus};
pub use crate::contribution::{ContributionBook, ContributionRecord};
pub use crate::reward::RewardShare;
pub use crate::shared::SharedBillLedger;
pub use crate::events::BillEvent;
pub use crate::ports::{Payout, TransferError, ValueTransfer};
pub use crate::config::{LedgerConfig, LedgerConfigError, RewardPolicy};
pub use crate::error::BillError;
