//! Receipt Credit Domain
//!
//! Receipt credits are a secondary balance that proves an account put value
//! into a bill. The bill ledger mints them when a contribution is accepted and
//! burns them when the contribution is refunded.
//!
//! # Key Concepts
//!
//! - **Issuance rate**: amount of value per one credit. Conversion is integer
//!   division, so a contribution below the rate earns no credit.
//! - **Minter**: the single caller allowed to change balances, identified by a
//!   [`MinterId`](core_kernel::MinterId) capability fixed when the ledger is
//!   created.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::{AccountId, Amount, MinterId};
//! use domain_receipt::{IssuanceRate, ReceiptLedger};
//!
//! let minter = MinterId::new();
//! let mut credits = ReceiptLedger::new(minter);
//! let rate = IssuanceRate::new(100).unwrap();
//!
//! let alice = AccountId::new();
//! let minted = rate.credits_for(Amount::new(1_050));
//! credits.mint(minter, alice, minted).unwrap();
//!
//! assert_eq!(credits.balance_of(&alice), 10);
//! ```

pub mod error;
pub mod rate;
pub mod ledger;

pub use error::CreditError;
pub use rate::IssuanceRate;
pub use ledger::{ReceiptLedger, SharedReceiptLedger, shared};
