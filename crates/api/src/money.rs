//! Wire formats for amounts and rates.
//!
//! Amounts arrive as decimal strings and rates as basis points or
//! percentage strings; both leave as integer cents plus a display string.

use fidu_core::tax::{AmountError, parse_amount, parse_percent};
use fidu_shared::{BasisPoints, Cents};
use serde::{Deserialize, Serialize};

/// A decimal amount as typed by a user, e.g. `"1'234.50"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AmountInput(pub String);

impl AmountInput {
    /// Parses into cents.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for anything `parse_amount` rejects.
    pub fn cents(&self) -> Result<Cents, AmountError> {
        parse_amount(&self.0)
    }
}

/// A rate given either as basis points (`810`) or as a percentage (`"8.1%"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RateInput {
    /// Integer basis points.
    BasisPoints(i64),
    /// Percentage string.
    Percent(String),
}

impl RateInput {
    /// Resolves to basis points.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if the value is outside 0..=10000 bp or unparseable.
    pub fn basis_points(&self) -> Result<BasisPoints, AmountError> {
        match self {
            Self::BasisPoints(bp) => Ok(BasisPoints::try_from(*bp)?),
            Self::Percent(text) => parse_percent(text),
        }
    }
}

/// Resolves an optional rate, falling back to `default`.
///
/// # Errors
///
/// Returns `InvalidRate` if a given rate is invalid.
pub fn rate_or(rate: Option<&RateInput>, default: BasisPoints) -> Result<BasisPoints, AmountError> {
    rate.map_or(Ok(default), RateInput::basis_points)
}

/// An amount in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    /// Integer minor units.
    pub cents: i64,
    /// Two-decimal rendering, e.g. `"1234.50"`.
    pub formatted: String,
}

impl From<Cents> for Money {
    fn from(value: Cents) -> Self {
        Self {
            cents: value.value(),
            formatted: value.to_string(),
        }
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self::from(Cents(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("810", 810)]
    #[case("\"8.1%\"", 810)]
    #[case("\"7,7\"", 770)]
    #[case("0", 0)]
    #[case("\"100\"", 10_000)]
    fn test_rate_input_accepts_both_forms(#[case] json: &str, #[case] expected: u32) {
        let rate: RateInput = serde_json::from_str(json).unwrap();
        assert_eq!(rate.basis_points().unwrap().value(), expected);
    }

    #[rstest]
    #[case("10001")]
    #[case("-1")]
    #[case("\"abc\"")]
    #[case("\"120%\"")]
    fn test_rate_input_rejects(#[case] json: &str) {
        let rate: RateInput = serde_json::from_str(json).unwrap();
        assert!(rate.basis_points().is_err());
    }

    #[test]
    fn test_rate_or_default() {
        assert_eq!(
            rate_or(None, BasisPoints::DEFAULT_TAX_RATE).unwrap(),
            BasisPoints::DEFAULT_TAX_RATE
        );
    }

    #[test]
    fn test_amount_input_parses_grouped() {
        let amount: AmountInput = serde_json::from_str("\"1'234.50\"").unwrap();
        assert_eq!(amount.cents().unwrap(), Cents(123_450));
        assert!(AmountInput("-5".into()).cents().is_err());
    }

    #[test]
    fn test_money_serializes_both_forms() {
        let json = serde_json::to_value(Money::from(Cents(123_450))).unwrap();
        assert_eq!(json["cents"], 123_450);
        assert_eq!(json["formatted"], "1234.50");
    }
}
