//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive from the product service as JSON numbers and are stored in
//! the persisted cart the same way, so `Price` serializes through
//! `rust_decimal::serde::float` while all arithmetic stays in `Decimal`.

use std::fmt;
use std::iter::Sum;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Decimal places used for display and totals.
const DISPLAY_SCALE: u32 = 2;

/// Errors constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store currency (dollars).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an integer number of cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, DISPLAY_SCALE))
    }

    /// Infallible variant of [`Self::from_cents`] for amounts that cannot be negative.
    #[must_use]
    pub fn from_unsigned_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), DISPLAY_SCALE))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a line quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Sum of two prices, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }

    /// Rounded to cents, half away from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// Formats as `$19.99`, always with two decimal places.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.rounded().0;
        amount.rescale(DISPLAY_SCALE);
        write!(f, "${amount}")
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents).unwrap()
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::from_cents(-1).unwrap_err();
        assert!(matches!(err, PriceError::Negative(_)));
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(price(1000).to_string(), "$10.00");
        assert_eq!(price(550).to_string(), "$5.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_rounded_half_away_from_zero() {
        let p = Price::new(Decimal::new(10_005, 3)).unwrap();
        assert_eq!(p.rounded(), price(1001));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [price(1000).times(2), price(550).times(1)].into_iter().sum();
        assert_eq!(total.rounded().to_string(), "$25.50");
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Price::new(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0)).unwrap();
        assert_eq!(huge.times(u32::MAX).amount(), Decimal::MAX);

        let max = Price::new(Decimal::MAX).unwrap();
        let total: Price = [max, price(100)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
        assert!(total.to_string().starts_with('$'));
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let p: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(p, price(1999));
        let whole: Price = serde_json::from_str("12").unwrap();
        assert_eq!(whole.to_string(), "$12.00");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3.5").is_err());
    }
}
