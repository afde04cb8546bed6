//! Integer amounts of value
//!
//! Every amount in the ledger is a non-negative integer count of the smallest
//! indivisible unit. There is no floating point and no implicit rounding:
//! arithmetic is checked and surfaces overflow or underflow as an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during amount arithmetic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow during calculation")]
    Overflow,

    #[error("Underflow: cannot subtract {rhs} from {lhs}")]
    Underflow { lhs: u128, rhs: u128 },

    #[error("Division by zero")]
    DivisionByZero,
}

/// A non-negative amount of value in minor units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from a count of minor units
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Returns the count of minor units
    pub const fn units(&self) -> u128 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    pub fn checked_sub(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0.checked_sub(other.0).map(Amount).ok_or(MoneyError::Underflow {
            lhs: self.0,
            rhs: other.0,
        })
    }

    /// Subtracts, clamping at zero
    pub fn saturating_sub(&self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    /// Integer division, discarding the remainder
    pub fn div_floor(&self, divisor: u128) -> Result<Amount, MoneyError> {
        if divisor == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Amount(self.0 / divisor))
    }

    /// Computes `self * numerator / denominator` rounded down
    ///
    /// The product is formed at 256-bit width, so only a quotient that does
    /// not fit in `u128` overflows. With `numerator <= denominator` (a
    /// proportional split) that never happens.
    pub fn mul_div_floor(&self, numerator: Amount, denominator: Amount) -> Result<Amount, MoneyError> {
        if denominator.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let (high, low) = widening_mul(self.0, numerator.0);
        div_wide(high, low, denominator.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Sums a sequence of amounts, failing on overflow
    pub fn checked_sum<I>(amounts: I) -> Result<Amount, MoneyError>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

/// Full product of two `u128` values as `(high, low)` halves
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a0, a1) = (a & MASK, a >> 64);
    let (b0, b1) = (b & MASK, b >> 64);

    let ll = a0 * b0;
    let lh = a0 * b1;
    let hl = a1 * b0;
    let hh = a1 * b1;

    // at most 3 * (2^64 - 1), cannot overflow
    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let low = (ll & MASK) | (mid << 64);
    let high = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (high, low)
}

/// Divides the 256-bit value `high:low` by `divisor`
///
/// Returns `None` when the quotient does not fit in `u128`.
fn div_wide(high: u128, low: u128, divisor: u128) -> Option<u128> {
    if high >= divisor {
        return None;
    }
    if high == 0 {
        return Some(low / divisor);
    }

    // restoring long division; `remainder < divisor` holds between steps
    let mut remainder = high;
    let mut quotient = 0u128;
    for bit in (0..128).rev() {
        let carry = remainder >> 127;
        remainder = (remainder << 1) | ((low >> bit) & 1);
        quotient <<= 1;
        if carry == 1 || remainder >= divisor {
            remainder = remainder.wrapping_sub(divisor);
            quotient |= 1;
        }
    }
    Some(quotient)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units as u128)
    }
}

impl From<Amount> for u128 {
    fn from(amount: Amount) -> u128 {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic() {
        let a = Amount::new(300);
        let b = Amount::new(700);

        assert_eq!(a.checked_add(b).unwrap(), Amount::new(1000));
        assert_eq!(b.checked_sub(a).unwrap(), Amount::new(400));
        assert_eq!(
            a.checked_sub(b),
            Err(MoneyError::Underflow { lhs: 300, rhs: 700 })
        );
        assert_eq!(Amount::new(u128::MAX).checked_add(Amount::new(1)), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(Amount::new(5).saturating_sub(Amount::new(9)), Amount::ZERO);
    }

    #[test]
    fn test_div_floor_discards_remainder() {
        assert_eq!(Amount::new(999).div_floor(100).unwrap(), Amount::new(9));
        assert_eq!(Amount::new(1).div_floor(0), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_mul_div_floor() {
        let pool = Amount::new(100);
        let share = pool.mul_div_floor(Amount::new(1), Amount::new(3)).unwrap();
        assert_eq!(share, Amount::new(33));
    }

    #[test]
    fn test_mul_div_floor_with_wide_product() {
        const E18: u128 = 1_000_000_000_000_000_000;
        let pool = Amount::new(1_000 * E18);

        let share = pool.mul_div_floor(Amount::new(60 * E18), Amount::new(100 * E18)).unwrap();

        assert_eq!(share, Amount::new(600 * E18));
    }

    #[test]
    fn test_mul_div_floor_at_limits() {
        let max = Amount::new(u128::MAX);

        assert_eq!(max.mul_div_floor(max, max).unwrap(), max);
        assert_eq!(max.mul_div_floor(Amount::new(u128::MAX - 1), max).unwrap(), Amount::new(u128::MAX - 1));
        assert_eq!(max.mul_div_floor(Amount::new(2), Amount::new(1)), Err(MoneyError::Overflow));
        assert_eq!(max.mul_div_floor(max, Amount::ZERO), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_widening_mul() {
        assert_eq!(widening_mul(u128::MAX, u128::MAX), (u128::MAX - 1, 1));
        assert_eq!(widening_mul(1 << 64, 1 << 64), (1, 0));
        assert_eq!(widening_mul(7, 6), (0, 42));
    }
}
