//! Parsing of human-entered amounts and percentages.
//!
//! Accepted amount forms: `10695.50`, `10695,50`, `10'695.50`, `10 695,50`,
//! `1,234.56`, `1.234,56`, `CHF 12.-`, `€ 9,90`, `Fr. 10.50`. The last `.`
//! or `,` is the decimal separator unless the same character repeats without
//! the other one present, in which case it groups thousands (`1.234.567`).
//! A value must resolve to whole cents: `1.005` is rejected, `1.500` is not.

use std::str::FromStr;

use fidu_shared::{BasisPoints, Cents};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::AmountError;

/// Parses an amount into cents.
///
/// # Errors
///
/// Returns `AmountError::InvalidAmount` if the text is empty, negative,
/// malformed, above `Cents::MAX_INPUT`, or has sub-cent precision.
///
/// ```
/// use fidu_core::tax::parse_amount;
/// use fidu_shared::Cents;
///
/// assert_eq!(parse_amount("10'695,50").unwrap(), Cents(1_069_550));
/// assert_eq!(parse_amount("10695.50").unwrap(), Cents(1_069_550));
/// ```
pub fn parse_amount(input: &str) -> Result<Cents, AmountError> {
    let invalid = || AmountError::InvalidAmount(format!("'{input}' is not a valid amount"));

    let value = parse_decimal(input).ok_or_else(invalid)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::InvalidAmount(format!(
            "'{input}' is negative"
        )));
    }

    let cents = value * Decimal::ONE_HUNDRED;
    if !cents.fract().is_zero() {
        return Err(AmountError::InvalidAmount(format!(
            "'{input}' has more precision than one cent"
        )));
    }

    let cents = cents.to_i64().map(Cents).ok_or_else(invalid)?;
    if cents > Cents::MAX_INPUT {
        return Err(AmountError::InvalidAmount(format!(
            "'{input}' exceeds the maximum of {}",
            Cents::MAX_INPUT
        )));
    }
    Ok(cents)
}

/// Parses a percentage such as `8.1`, `8,1 %` or `7.7%` into basis points.
///
/// The value is multiplied by 100 and rounded half away from zero.
///
/// # Errors
///
/// Returns `AmountError::InvalidRate` if the text is malformed, negative,
/// or above 100 %.
pub fn parse_percent(input: &str) -> Result<BasisPoints, AmountError> {
    let invalid = || AmountError::InvalidRate(format!("'{input}' is not a valid percentage"));

    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(invalid());
    }

    let normalized = normalize_separators(trimmed).ok_or_else(invalid)?;
    let percent = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    let bp = (percent * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .ok_or_else(invalid)?;

    BasisPoints::new(bp).map_err(AmountError::from)
}

/// Strips currency decoration and grouping, then parses the number.
fn parse_decimal(input: &str) -> Option<Decimal> {
    let core = strip_decoration(input);
    let (negative, body) = match core.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, core.strip_prefix('+').unwrap_or(core)),
    };

    let compact: String = body.chars().filter(|c| !is_grouping(*c)).collect();
    if compact.is_empty() {
        return None;
    }

    let normalized = normalize_separators(&compact)?;
    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}

/// Removes leading and trailing text around the number (`CHF`, `€`, `.-`).
fn strip_decoration(input: &str) -> &str {
    let trimmed = input.trim();
    let chars: Vec<(usize, char)> = trimmed.char_indices().collect();

    let start = chars.iter().enumerate().find_map(|(i, &(pos, c))| {
        let next_is_digit = chars.get(i + 1).is_some_and(|&(_, n)| n.is_ascii_digit());
        let starts_number =
            c.is_ascii_digit() || ((c == '-' || c == '+' || is_separator(c)) && next_is_digit);
        starts_number.then_some(pos)
    });
    let end = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_ascii_digit())
        .map(|(pos, c)| pos + c.len_utf8());

    match (start, end) {
        (Some(start), Some(end)) if start < end => &trimmed[start..end],
        _ => "",
    }
}

/// Rewrites `digits[sep digits]` into a `Decimal`-parseable string.
///
/// Returns `None` for characters other than digits and separators, or for
/// separator layouts with no single reading.
fn normalize_separators(s: &str) -> Option<String> {
    if !s.chars().all(|c| c.is_ascii_digit() || is_separator(c)) {
        return None;
    }

    let Some(last_pos) = s.rfind(is_separator) else {
        return Some(s.to_string());
    };
    let last = s[last_pos..].chars().next()?;
    let other = if last == '.' { ',' } else { '.' };
    let repeats = s.matches(last).count() > 1;

    if repeats {
        if s.contains(other) {
            return None;
        }
        // Only one kind of separator, repeated: thousands grouping.
        return Some(s.replace(last, ""));
    }

    let int_part: String = s[..last_pos].chars().filter(|c| *c != other).collect();
    let frac_part = &s[last_pos + 1..];
    if frac_part.contains(other) {
        return None;
    }

    let int_part = if int_part.is_empty() { "0" } else { &int_part };
    if frac_part.is_empty() {
        Some(int_part.to_string())
    } else {
        Some(format!("{int_part}.{frac_part}"))
    }
}

fn is_separator(c: char) -> bool {
    c == '.' || c == ','
}

fn is_grouping(c: char) -> bool {
    c.is_whitespace() || c == '\'' || c == '\u{2019}'
}
