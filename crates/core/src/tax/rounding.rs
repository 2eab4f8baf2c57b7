//! The one rounding rule used by every money computation.
//!
//! Halves round away from zero (`0.5 -> 1`, `-0.5 -> -1`). Work is done on
//! `i128` so that `cents * 10_000` can never overflow for any `i64` amount.

/// Divides `numerator` by `denominator`, rounding halves away from zero.
///
/// `denominator` must be positive.
#[must_use]
pub const fn round_half_away_from_zero(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        if numerator < 0 { quotient - 1 } else { quotient + 1 }
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 4, 3)] // 2.5
    #[case(14, 4, 4)] // 3.5
    #[case(9, 4, 2)] // 2.25
    #[case(11, 4, 3)] // 2.75
    #[case(-10, 4, -3)] // -2.5
    #[case(-9, 4, -2)] // -2.25
    #[case(0, 7, 0)]
    #[case(100_000_000, 10_810, 9251)] // 9250.69...
    fn test_rounding(#[case] numerator: i128, #[case] denominator: i128, #[case] expected: i128) {
        assert_eq!(round_half_away_from_zero(numerator, denominator), expected);
    }
}
