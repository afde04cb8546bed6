//! Domain events for the bill ledger
//!
//! Events are staged while an operation runs and only published once every
//! effect of the operation (state, credits, transfers) has committed. A
//! rolled-back operation publishes nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Amount, BillId};

/// Domain events emitted by the bill ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillEvent {
    /// A new funding campaign was opened
    BillCreated {
        bill_id: BillId,
        creator: AccountId,
        payee: AccountId,
        target: Amount,
        deadline: Option<DateTime<Utc>>,
        timestamp: DateTime<Utc>,
    },

    /// Part or all of a contribution was accepted
    Contributed {
        bill_id: BillId,
        contributor: AccountId,
        accepted: Amount,
        new_total_paid: Amount,
        timestamp: DateTime<Utc>,
    },

    /// The payee collected the funded total
    Withdrawn {
        bill_id: BillId,
        payee: AccountId,
        amount: Amount,
        timestamp: DateTime<Utc>,
    },

    /// A contributor reclaimed their contribution after the deadline
    Refunded {
        bill_id: BillId,
        contributor: AccountId,
        amount: Amount,
        timestamp: DateTime<Utc>,
    },

    /// The administrator added to a bill's reward pool
    RewardPoolSeeded {
        bill_id: BillId,
        amount: Amount,
        new_pool: Amount,
        timestamp: DateTime<Utc>,
    },

    /// One share of a reward pool was paid out
    RewardPaid {
        bill_id: BillId,
        recipient: AccountId,
        amount: Amount,
        timestamp: DateTime<Utc>,
    },

    /// Value not owed to any bill was swept out
    StrayFundsRescued {
        to: AccountId,
        amount: Amount,
        timestamp: DateTime<Utc>,
    },

    /// Administrative authority moved to a new account
    AdministrationTransferred {
        previous: AccountId,
        new: AccountId,
        timestamp: DateTime<Utc>,
    },

    /// Conversion rate for future receipt credits changed
    IssuanceRateChanged {
        previous: u128,
        new: u128,
        timestamp: DateTime<Utc>,
    },

    /// Receipt ledger attached, swapped or detached
    ReceiptLedgerChanged {
        attached: bool,
        timestamp: DateTime<Utc>,
    },
}

impl BillEvent {
    /// Returns the bill this event concerns, if any
    pub fn bill_id(&self) -> Option<BillId> {
        match self {
            BillEvent::BillCreated { bill_id, .. }
            | BillEvent::Contributed { bill_id, .. }
            | BillEvent::Withdrawn { bill_id, .. }
            | BillEvent::Refunded { bill_id, .. }
            | BillEvent::RewardPoolSeeded { bill_id, .. }
            | BillEvent::RewardPaid { bill_id, .. } => Some(*bill_id),
            BillEvent::StrayFundsRescued { .. }
            | BillEvent::AdministrationTransferred { .. }
            | BillEvent::IssuanceRateChanged { .. }
            | BillEvent::ReceiptLedgerChanged { .. } => None,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            BillEvent::BillCreated { timestamp, .. }
            | BillEvent::Contributed { timestamp, .. }
            | BillEvent::Withdrawn { timestamp, .. }
            | BillEvent::Refunded { timestamp, .. }
            | BillEvent::RewardPoolSeeded { timestamp, .. }
            | BillEvent::RewardPaid { timestamp, .. }
            | BillEvent::StrayFundsRescued { timestamp, .. }
            | BillEvent::AdministrationTransferred { timestamp, .. }
            | BillEvent::IssuanceRateChanged { timestamp, .. }
            | BillEvent::ReceiptLedgerChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            BillEvent::BillCreated { .. } => "BillCreated",
            BillEvent::Contributed { .. } => "Contributed",
            BillEvent::Withdrawn { .. } => "Withdrawn",
            BillEvent::Refunded { .. } => "Refunded",
            BillEvent::RewardPoolSeeded { .. } => "RewardPoolSeeded",
            BillEvent::RewardPaid { .. } => "RewardPaid",
            BillEvent::StrayFundsRescued { .. } => "StrayFundsRescued",
            BillEvent::AdministrationTransferred { .. } => "AdministrationTransferred",
            BillEvent::IssuanceRateChanged { .. } => "IssuanceRateChanged",
            BillEvent::ReceiptLedgerChanged { .. } => "ReceiptLedgerChanged",
        }
    }
}
