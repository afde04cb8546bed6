//! Unit tests for integer amounts
//!
//! Tests cover construction, checked arithmetic, proportional splits,
//! and serialization.

use core_kernel::{Amount, MoneyError};

mod creation {
    use super::*;

    #[test]
    fn test_new_holds_units() {
        let amount = Amount::new(1_000);
        assert_eq!(amount.units(), 1_000);
        assert!(!amount.is_zero());
    }

    #[test]
    fn test_zero_and_default_agree() {
        assert_eq!(Amount::ZERO, Amount::default());
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Amount::from(5u64), Amount::new(5));
        assert_eq!(Amount::from(5u128), Amount::new(5));
        let raw: u128 = Amount::new(9).into();
        assert_eq!(raw, 9);
    }

    #[test]
    fn test_display_is_plain_integer() {
        assert_eq!(Amount::new(1234).to_string(), "1234");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_overflow() {
        let result = Amount::new(u128::MAX).checked_add(Amount::new(1));
        assert_eq!(result, Err(MoneyError::Overflow));
    }

    #[test]
    fn test_checked_sub_underflow_reports_operands() {
        match Amount::new(10).checked_sub(Amount::new(11)) {
            Err(MoneyError::Underflow { lhs, rhs }) => {
                assert_eq!(lhs, 10);
                assert_eq!(rhs, 11);
            }
            other => panic!("Expected underflow, got {:?}", other),
        }
    }

    #[test]
    fn test_remaining_need_never_negative() {
        let target = Amount::new(1000);
        let paid = Amount::new(1000);
        assert_eq!(target.saturating_sub(paid), Amount::ZERO);
    }

    #[test]
    fn test_checked_sum() {
        let total = Amount::checked_sum(vec![Amount::new(1), Amount::new(2), Amount::new(3)]).unwrap();
        assert_eq!(total, Amount::new(6));

        let overflow = Amount::checked_sum(vec![Amount::new(u128::MAX), Amount::new(1)]);
        assert_eq!(overflow, Err(MoneyError::Overflow));
    }

    #[test]
    fn test_ordering_and_min() {
        assert!(Amount::new(3) < Amount::new(4));
        assert_eq!(Amount::new(3).min(Amount::new(4)), Amount::new(3));
    }

    #[test]
    fn test_mul_div_floor_rejects_zero_denominator() {
        let result = Amount::new(10).mul_div_floor(Amount::new(1), Amount::ZERO);
        assert_eq!(result, Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_mul_div_floor_overflow() {
        let result = Amount::new(u128::MAX).mul_div_floor(Amount::new(2), Amount::new(3));
        assert_eq!(result, Err(MoneyError::Overflow));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_amount_serializes_transparently() {
        let json = serde_json::to_string(&Amount::new(250)).unwrap();
        assert_eq!(json, "250");

        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Amount::new(250));
    }
}
