//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog service stores prices as JSON numbers (`"price": 249.9`), so
//! [`Price`] serializes through `rust_decimal::serde::float`. All arithmetic
//! (line totals, cart totals) is done on [`Decimal`] to avoid float drift.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price '{0}' is not a number")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in the store currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount; totals saturate here.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// Negative input is clamped to zero.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents.max(0), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Price::MAX`].
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Price::MAX`].
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(19_990).to_string(), "$199.90");
        assert_eq!("5".parse::<Price>().unwrap().to_string(), "$5.00");
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert_eq!("-1".parse::<Price>(), Err(PriceError::Negative));
        assert!(matches!(
            "cheap".parse::<Price>(),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_json_number_roundtrip() {
        let price: Price = serde_json::from_str("249.9").unwrap();
        assert_eq!(price, "249.90".parse().unwrap());
        assert_eq!(serde_json::to_string(&price).unwrap(), "249.9");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = "12.50".parse::<Price>().unwrap();
        let total: Price = [unit.times(2), Price::from_cents(100)].into_iter().sum();
        assert_eq!(total.to_string(), "$26.00");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = "100000000000000000000".parse::<Price>().unwrap();
        assert_eq!(huge.times(u32::MAX), Price::MAX);
        assert_eq!(Price::MAX + Price::from_cents(1), Price::MAX);
        assert_eq!([Price::MAX, Price::MAX].into_iter().sum::<Price>(), Price::MAX);
    }
}
