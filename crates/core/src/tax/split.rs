//! Gross/net/VAT decomposition.
//!
//! The net part is the only rounded value. VAT is always the remainder
//! `gross - net`, so `net + tax == gross` holds exactly for every input.

use fidu_shared::{BasisPoints, Cents};
use serde::{Deserialize, Serialize};

use super::rounding::round_half_away_from_zero;

const BP_SCALE: i128 = BasisPoints::MAX as i128;

/// A gross amount split into its net and VAT components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    /// Tax-inclusive amount.
    pub gross: Cents,
    /// Tax-exclusive amount.
    pub net: Cents,
    /// VAT part.
    pub tax: Cents,
}

/// Splits a VAT-inclusive amount into net and VAT.
///
/// `net = round(gross / (1 + rate))`, `tax = gross - net`. Zero or negative
/// gross amounts carry no VAT.
///
/// ```
/// use fidu_core::tax::split_gross_to_net_and_tax;
/// use fidu_shared::{BasisPoints, Cents};
///
/// let split = split_gross_to_net_and_tax(Cents(10_000), BasisPoints::DEFAULT_TAX_RATE);
/// assert_eq!(split.net, Cents(9_251));
/// assert_eq!(split.tax, Cents(749));
/// ```
#[must_use]
pub fn split_gross_to_net_and_tax(gross: Cents, rate: BasisPoints) -> TaxSplit {
    if gross.value() <= 0 {
        return TaxSplit {
            gross,
            net: gross,
            tax: Cents::ZERO,
        };
    }

    let numerator = i128::from(gross.value()) * BP_SCALE;
    let denominator = BP_SCALE + i128::from(rate.value());
    let net = round_half_away_from_zero(numerator, denominator);
    // 0 < net <= gross, so the conversion cannot fail
    let net = Cents(i64::try_from(net).unwrap_or(gross.value()));

    TaxSplit {
        gross,
        net,
        tax: (gross - net).non_negative(),
    }
}

/// Adds VAT on top of a net amount.
///
/// `tax = round(net * rate)`, `gross = net + tax`.
#[must_use]
pub fn gross_from_net(net: Cents, rate: BasisPoints) -> TaxSplit {
    if net.value() <= 0 {
        return TaxSplit {
            gross: net,
            net,
            tax: Cents::ZERO,
        };
    }

    let tax = round_half_away_from_zero(
        i128::from(net.value()) * i128::from(rate.value()),
        BP_SCALE,
    );
    // tax <= net because rate <= 100 %
    let tax = Cents(i64::try_from(tax).unwrap_or(net.value()));

    TaxSplit {
        gross: net + tax,
        net,
        tax,
    }
}

/// Recombines a net amount and its VAT.
#[must_use]
pub fn combine_net_and_tax_to_gross(net: Cents, tax: Cents) -> Cents {
    net + tax
}
