//! Reward pool accounting
//!
//! The administrator may attach bonus funds to any bill. Once the bill has
//! reached its target, anyone may trigger a one-shot distribution of the
//! pool. Who receives it is decided by the ledger's [`RewardPolicy`].

use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Amount, BillId};

use crate::config::RewardPolicy;
use crate::error::BillError;
use crate::events::BillEvent;
use crate::ledger::BillLedger;
use crate::ports::Payout;

/// One recipient's portion of a distributed reward pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardShare {
    pub recipient: AccountId,
    pub amount: Amount,
}

impl BillLedger {
    /// Adds `amount` to a bill's reward pool, returning the new pool size
    ///
    /// # Errors
    ///
    /// `NotAdministrator`, `BillNotFound`, or `InvalidInput` for a zero amount
    pub fn seed_reward_pool(
        &mut self,
        caller: AccountId,
        bill_id: BillId,
        amount: Amount,
    ) -> Result<Amount, BillError> {
        self.ensure_administrator(caller)?;
        let bill = self.bill_ref(bill_id)?;
        if amount.is_zero() {
            return Err(BillError::invalid_input("reward pool seed must be positive"));
        }

        let new_pool = bill.reward_pool.checked_add(amount)?;
        let new_custody = self.custody.checked_add(amount)?;

        self.bill_mut(bill_id)?.reward_pool = new_pool;
        self.custody = new_custody;

        let timestamp = self.now();
        self.publish([BillEvent::RewardPoolSeeded {
            bill_id,
            amount,
            new_pool,
            timestamp,
        }]);
        tracing::info!(bill_id = %bill_id, amount = %amount, pool = %new_pool, "reward pool seeded");

        Ok(new_pool)
    }

    /// Pays out a funded bill's reward pool
    ///
    /// A bill that has been withdrawn counts as funded, since withdrawal
    /// requires the target to have been reached.
    ///
    /// # Errors
    ///
    /// `BillNotFound`, `NotFunded`, `EmptyRewardPool`, or `TransferFailed`
    /// which leaves the pool intact.
    pub fn distribute_rewards(&mut self, bill_id: BillId, caller: AccountId) -> Result<Vec<RewardShare>, BillError> {
        let bill = self.bill_ref(bill_id)?;
        if !(bill.withdrawn || bill.is_funded()) {
            return Err(BillError::NotFunded(bill_id));
        }
        let pool = bill.reward_pool;
        if pool.is_zero() {
            return Err(BillError::EmptyRewardPool(bill_id));
        }

        let shares = self.reward_shares(bill_id, pool)?;
        let new_custody = self.custody.checked_sub(pool)?;
        let snapshot = self.snapshot(bill_id, None)?;

        self.bill_mut(bill_id)?.reward_pool = Amount::ZERO;
        self.custody = new_custody;

        let payouts: Vec<Payout> = shares
            .iter()
            .map(|share| Payout::new(share.recipient, share.amount))
            .collect();
        if let Err(e) = self.transfer.pay(&payouts) {
            tracing::warn!(bill_id = %bill_id, pool = %pool, error = %e, "reward distribution rolled back");
            self.restore(snapshot);
            return Err(e.into());
        }

        let timestamp = self.now();
        self.publish(shares.iter().map(|share| BillEvent::RewardPaid {
            bill_id,
            recipient: share.recipient,
            amount: share.amount,
            timestamp,
        }));
        tracing::info!(
            bill_id = %bill_id,
            caller = %caller,
            pool = %pool,
            recipients = shares.len(),
            policy = ?self.reward_policy,
            "reward pool distributed"
        );

        Ok(shares)
    }

    /// Splits `pool` according to the configured policy
    fn reward_shares(&self, bill_id: BillId, pool: Amount) -> Result<Vec<RewardShare>, BillError> {
        let administrator_share = |amount| RewardShare {
            recipient: self.administrator,
            amount,
        };

        match self.reward_policy {
            RewardPolicy::Administrator => Ok(vec![administrator_share(pool)]),
            RewardPolicy::ProRata => {
                let weights: Vec<(AccountId, Amount)> = self.book(bill_id)?.active().collect();
                let total = Amount::checked_sum(weights.iter().map(|(_, weight)| *weight))?;
                if total.is_zero() {
                    return Ok(vec![administrator_share(pool)]);
                }

                let mut shares = Vec::with_capacity(weights.len() + 1);
                let mut paid = Amount::ZERO;
                for (recipient, weight) in weights {
                    let amount = pool.mul_div_floor(weight, total)?;
                    if amount.is_zero() {
                        continue;
                    }
                    paid = paid.checked_add(amount)?;
                    shares.push(RewardShare { recipient, amount });
                }

                // rounding dust
                let remainder = pool.checked_sub(paid)?;
                if !remainder.is_zero() {
                    shares.push(administrator_share(remainder));
                }
                Ok(shares)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::ports::mock::InMemoryTreasury;
    use std::sync::Arc;

    fn ledger(policy: RewardPolicy) -> (BillLedger, InMemoryTreasury, AccountId) {
        let admin = AccountId::new();
        let treasury = InMemoryTreasury::new();
        let config = LedgerConfig::new(admin).with_reward_policy(policy);
        let ledger = BillLedger::new(&config, Arc::new(treasury.clone())).unwrap();
        (ledger, treasury, admin)
    }

    #[test]
    fn test_pro_rata_split_sends_dust_to_administrator() {
        let (mut ledger, treasury, admin) = ledger(RewardPolicy::ProRata);
        let id = ledger.create_bill(admin, AccountId::new(), Amount::new(3), None).unwrap();
        let (a, b, c) = (AccountId::new(), AccountId::new(), AccountId::new());
        for account in [a, b, c] {
            ledger.contribute(id, account, Amount::new(1)).unwrap();
        }
        ledger.seed_reward_pool(admin, id, Amount::new(100)).unwrap();

        let shares = ledger.distribute_rewards(id, a).unwrap();

        assert_eq!(shares.len(), 4);
        for account in [a, b, c] {
            assert_eq!(treasury.received_by(&account), Amount::new(33));
        }
        assert_eq!(treasury.received_by(&admin), Amount::new(1));
    }

    #[test]
    fn test_failed_distribution_keeps_pool() {
        let (mut ledger, treasury, admin) = ledger(RewardPolicy::Administrator);
        let id = ledger.create_bill(admin, AccountId::new(), Amount::new(10), None).unwrap();
        ledger.contribute(id, AccountId::new(), Amount::new(10)).unwrap();
        ledger.seed_reward_pool(admin, id, Amount::new(50)).unwrap();
        treasury.refuse_payments_to(admin);

        let result = ledger.distribute_rewards(id, admin);

        assert!(matches!(result, Err(BillError::TransferFailed(_))));
        assert_eq!(ledger.bill(id).unwrap().reward_pool, Amount::new(50));
        assert_eq!(ledger.custody(), Amount::new(60));
    }
}
