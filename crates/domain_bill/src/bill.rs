//! Bill entity
//!
//! A bill is one funding campaign. Its fields only change through the
//! ledger's transitions; outside the crate it is handed out as a snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Amount, BillId};

/// Observable lifecycle position of a bill
///
/// Derived from the bill's fields and the current time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    /// Under target and still collecting
    Open,
    /// Target reached, waiting for the payee
    Funded,
    /// Under target with the deadline passed; contributors may reclaim
    Expired,
    /// Payee collected the total
    Withdrawn,
}

/// A funding campaign
///
/// # Invariants
///
/// - `total_paid <= target`
/// - `withdrawn` only moves from false to true
/// - once `withdrawn`, `total_paid` stays zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    /// Account that opened the bill (informational)
    pub creator: AccountId,
    /// Only account allowed to withdraw
    pub payee: AccountId,
    pub target: Amount,
    /// Value contributed and still held for this bill
    pub total_paid: Amount,
    /// None means the bill never becomes refundable by time
    pub deadline: Option<DateTime<Utc>>,
    pub withdrawn: bool,
    /// Administrator-seeded bonus, kept apart from `total_paid`
    pub reward_pool: Amount,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub(crate) fn new(
        id: BillId,
        creator: AccountId,
        payee: AccountId,
        target: Amount,
        deadline: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            creator,
            payee,
            target,
            total_paid: Amount::ZERO,
            deadline,
            withdrawn: false,
            reward_pool: Amount::ZERO,
            created_at,
        }
    }

    /// True once contributions cover the target
    pub fn is_funded(&self) -> bool {
        self.total_paid >= self.target
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> Amount {
        self.target.saturating_sub(self.total_paid)
    }

    /// True if a deadline is set and `now` is at or past it
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.map_or(false, |deadline| now >= deadline)
    }

    /// True if a contributor could reclaim funds at `now`
    pub fn is_refundable(&self, now: DateTime<Utc>) -> bool {
        !self.withdrawn && self.deadline_passed(now) && !self.is_funded()
    }

    pub fn status(&self, now: DateTime<Utc>) -> BillStatus {
        if self.withdrawn {
            BillStatus::Withdrawn
        } else if self.is_funded() {
            BillStatus::Funded
        } else if self.deadline_passed(now) {
            BillStatus::Expired
        } else {
            BillStatus::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn bill(target: u128, deadline: Option<DateTime<Utc>>) -> Bill {
        Bill::new(BillId::FIRST, AccountId::new(), AccountId::new(), Amount::new(target), deadline, Utc::now())
    }

    #[test]
    fn test_remaining_shrinks_with_payments() {
        let mut bill = bill(1000, None);
        bill.total_paid = Amount::new(300);

        assert_eq!(bill.remaining(), Amount::new(700));
        assert!(!bill.is_funded());
    }

    #[test]
    fn test_no_deadline_never_passes() {
        let bill = bill(1000, None);
        let far_future = Utc::now() + Duration::days(365 * 100);

        assert!(!bill.deadline_passed(far_future));
        assert_eq!(bill.status(far_future), BillStatus::Open);
    }

    #[test]
    fn test_deadline_passes_at_exact_instant() {
        let deadline = Utc::now();
        let bill = bill(1000, Some(deadline));

        assert!(!bill.deadline_passed(deadline - Duration::seconds(1)));
        assert!(bill.deadline_passed(deadline));
        assert_eq!(bill.status(deadline), BillStatus::Expired);
        assert!(bill.is_refundable(deadline));
    }

    #[test]
    fn test_status_precedence() {
        let deadline = Utc::now();
        let mut bill = bill(100, Some(deadline));
        bill.total_paid = Amount::new(100);
        assert_eq!(bill.status(deadline), BillStatus::Funded);
        assert!(!bill.is_refundable(deadline));

        bill.withdrawn = true;
        bill.total_paid = Amount::ZERO;
        assert_eq!(bill.status(deadline), BillStatus::Withdrawn);
    }
}
