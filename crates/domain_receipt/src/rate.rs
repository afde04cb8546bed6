//! Issuance rate

use core_kernel::Amount;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::CreditError;

/// Amount of value per one unit of receipt credit
///
/// Always positive; a zero rate cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u128")]
pub struct IssuanceRate(u128);

impl IssuanceRate {
    /// One credit per unit of value
    pub const ONE: IssuanceRate = IssuanceRate(1);

    pub fn new(rate: u128) -> Result<Self, CreditError> {
        if rate == 0 {
            return Err(CreditError::InvalidRate(rate));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Converts an amount of value into whole credits, discarding the remainder
    pub fn credits_for(&self, amount: Amount) -> u128 {
        amount.units() / self.0
    }
}

impl Default for IssuanceRate {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u128> for IssuanceRate {
    type Error = CreditError;

    fn try_from(rate: u128) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<IssuanceRate> for u128 {
    fn from(rate: IssuanceRate) -> u128 {
        rate.0
    }
}

/// Accepts any non-negative integer or decimal string
///
/// Environment sources hand integers over as `i64`, JSON as `u64`.
impl<'de> Deserialize<'de> for IssuanceRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RateVisitor)
    }
}

struct RateVisitor;

impl<'de> Visitor<'de> for RateVisitor {
    type Value = IssuanceRate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a positive integer issuance rate")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        self.visit_u128(u128::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match u128::try_from(v) {
            Ok(rate) => self.visit_u128(rate),
            Err(_) => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        IssuanceRate::new(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let rate = v
            .trim()
            .parse::<u128>()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))?;
        self.visit_u128(rate)
    }
}

impl fmt::Display for IssuanceRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per credit", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_rejected() {
        assert_eq!(IssuanceRate::new(0), Err(CreditError::InvalidRate(0)));
    }

    #[test]
    fn test_credits_for_uses_integer_division() {
        let rate = IssuanceRate::new(3).unwrap();
        assert_eq!(rate.credits_for(Amount::new(10)), 3);
        assert_eq!(rate.credits_for(Amount::new(2)), 0);
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<IssuanceRate>("0").is_err());
        assert_eq!(serde_json::from_str::<IssuanceRate>("25").unwrap().value(), 25);
    }

    #[test]
    fn test_deserialize_from_signed_source() {
        use serde::de::value::{Error as ValueError, I64Deserializer, StrDeserializer};
        use serde::de::IntoDeserializer;

        let rate = IssuanceRate::deserialize::<I64Deserializer<ValueError>>(10i64.into_deserializer()).unwrap();
        assert_eq!(rate.value(), 10);

        let negative = IssuanceRate::deserialize::<I64Deserializer<ValueError>>((-3i64).into_deserializer());
        assert!(negative.is_err());

        let text = IssuanceRate::deserialize::<StrDeserializer<ValueError>>("40".into_deserializer()).unwrap();
        assert_eq!(text.value(), 40);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let rate = IssuanceRate::new(7).unwrap();
        assert_eq!(serde_json::to_string(&rate).unwrap(), "7");
    }
}
