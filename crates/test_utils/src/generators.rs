//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random ledger inputs.

use core_kernel::Amount;
use domain_bill::RewardPolicy;
use proptest::prelude::*;

/// One step of a generated contribution sequence
#[derive(Debug, Clone, Copy)]
pub struct ContributionStep {
    /// Index into a fixed pool of contributor accounts
    pub contributor: usize,
    pub amount: Amount,
}

/// Strategy for positive amounts small enough to never overflow in sums
pub fn positive_amount_strategy() -> impl Strategy<Value = Amount> {
    (1u128..1_000_000u128).prop_map(Amount::new)
}

/// Strategy for funding targets
pub fn target_strategy() -> impl Strategy<Value = Amount> {
    (1u128..5_000_000u128).prop_map(Amount::new)
}

/// Strategy for valid issuance rates
pub fn issuance_rate_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![Just(1u128), 2u128..1_000u128]
}

pub fn reward_policy_strategy() -> impl Strategy<Value = RewardPolicy> {
    prop_oneof![Just(RewardPolicy::Administrator), Just(RewardPolicy::ProRata)]
}

/// Strategy for a sequence of contributions drawn from `contributors` accounts
pub fn contribution_sequence_strategy(
    contributors: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<ContributionStep>> {
    let contributors = contributors.max(1);
    proptest::collection::vec(
        (0..contributors, positive_amount_strategy())
            .prop_map(|(contributor, amount)| ContributionStep { contributor, amount }),
        1..max_len.max(2),
    )
}
