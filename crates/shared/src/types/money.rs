//! Money in integer minor currency units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the system is a whole number of cents; `Decimal` is only
//! used at the edges for parsing and display.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount counted in minor units (cents).
///
/// Non-negative unless it explicitly represents a signed adjustment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Largest single amount accepted from user input (10^13 currency units).
    ///
    /// Sums of thousands of such amounts still fit in an `i64`.
    pub const MAX_INPUT: Self = Self(1_000_000_000_000_000);

    /// Creates an amount from a raw count of cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw count of cents.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Floors the amount at zero.
    #[must_use]
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 { Self::ZERO } else { self }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Adds two amounts, clamping at the `i64` bounds.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Returns the amount as a decimal with two fraction digits.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Cents> for i64 {
    fn from(value: Cents) -> Self {
        value.0
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Saturates instead of overflowing.
impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cents_display() {
        assert_eq!(Cents(1_069_550).to_string(), "10695.50");
        assert_eq!(Cents(5).to_string(), "0.05");
        assert_eq!(Cents(0).to_string(), "0.00");
        assert_eq!(Cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_cents_to_decimal() {
        assert_eq!(Cents(12_345).to_decimal(), dec!(123.45));
    }

    #[test]
    fn test_cents_arithmetic() {
        let mut total = Cents(100) + Cents(250);
        assert_eq!(total, Cents(350));
        total -= Cents(400);
        assert!(total.is_negative());
        assert_eq!(total.non_negative(), Cents::ZERO);
    }

    #[test]
    fn test_cents_sum() {
        let amounts = [Cents(30_000), Cents(70_000)];
        assert_eq!(amounts.iter().sum::<Cents>(), Cents(100_000));
        assert_eq!(Vec::<Cents>::new().into_iter().sum::<Cents>(), Cents::ZERO);
    }

    #[test]
    fn test_cents_sum_saturates_on_overflow() {
        let amounts = [Cents(i64::MAX - 5), Cents(10), Cents(1)];
        assert_eq!(amounts.iter().sum::<Cents>(), Cents(i64::MAX));
    }

    #[test]
    fn test_cents_checked_add() {
        assert_eq!(Cents(1).checked_add(Cents(2)), Some(Cents(3)));
        assert_eq!(Cents(i64::MAX).checked_add(Cents(1)), None);
        assert!(Cents::MAX_INPUT.value() < i64::MAX / 1_000);
    }

    #[test]
    fn test_cents_serde_transparent() {
        let json = serde_json::to_string(&Cents(810)).unwrap();
        assert_eq!(json, "810");
        let back: Cents = serde_json::from_str("810").unwrap();
        assert_eq!(back, Cents(810));
    }
}
