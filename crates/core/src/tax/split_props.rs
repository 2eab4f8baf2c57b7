//! Property-based tests for the gross/net/VAT split.

use fidu_shared::{BasisPoints, Cents};
use proptest::prelude::*;

use super::parse::parse_amount;
use super::split::{combine_net_and_tax_to_gross, split_gross_to_net_and_tax};

/// Amounts from 0.00 to 100,000,000.00.
fn gross_amount() -> impl Strategy<Value = Cents> {
    (0i64..10_000_000_000i64).prop_map(Cents)
}

fn rate() -> impl Strategy<Value = BasisPoints> {
    (0u32..=BasisPoints::MAX).prop_map(|bp| BasisPoints::new(bp).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Net and tax always add back up to the gross amount.
    #[test]
    fn prop_split_reconstructs_gross(gross in gross_amount(), rate in rate()) {
        let split = split_gross_to_net_and_tax(gross, rate);

        prop_assert_eq!(split.net + split.tax, gross);
        prop_assert_eq!(combine_net_and_tax_to_gross(split.net, split.tax), gross);
        prop_assert!(!split.tax.is_negative());
        prop_assert!(!split.net.is_negative());
    }

    /// A higher rate never raises net and never lowers tax.
    #[test]
    fn prop_rate_monotonicity(
        gross in gross_amount(),
        low in 0u32..=BasisPoints::MAX,
        high in 0u32..=BasisPoints::MAX,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let lower = split_gross_to_net_and_tax(gross, BasisPoints::new(low).unwrap());
        let higher = split_gross_to_net_and_tax(gross, BasisPoints::new(high).unwrap());

        prop_assert!(higher.net <= lower.net);
        prop_assert!(higher.tax >= lower.tax);
    }

    /// Zero rate means no VAT at all.
    #[test]
    fn prop_zero_rate_has_no_tax(gross in gross_amount()) {
        let split = split_gross_to_net_and_tax(gross, BasisPoints::ZERO);
        prop_assert_eq!(split.net, gross);
        prop_assert_eq!(split.tax, Cents::ZERO);
    }

    /// Formatted cents parse back to the same value, with either separator.
    #[test]
    fn prop_formatted_amount_parses(cents in 0i64..10_000_000_000i64) {
        let dotted = Cents(cents).to_string();
        let comma = dotted.replace('.', ",");

        prop_assert_eq!(parse_amount(&dotted).unwrap(), Cents(cents));
        prop_assert_eq!(parse_amount(&comma).unwrap(), Cents(cents));
    }
}

#[test]
fn test_standard_rate_scenario() {
    let split = split_gross_to_net_and_tax(Cents(10_000), BasisPoints::new(810).unwrap());
    assert_eq!((split.net, split.tax), (Cents(9_251), Cents(749)));
}

#[test]
fn test_swiss_and_plain_notation_agree() {
    assert_eq!(parse_amount("10'695,50").unwrap(), Cents(1_069_550));
    assert_eq!(parse_amount("10695.50").unwrap(), Cents(1_069_550));
}
