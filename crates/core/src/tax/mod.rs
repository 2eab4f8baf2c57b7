//! Tax-inclusive amount handling.
//!
//! This module converts between gross (VAT-inclusive) amounts and their
//! net/VAT decomposition, and is the single entry point for turning
//! human-entered amount and rate strings into cents and basis points.

pub mod error;
pub mod parse;
pub mod rounding;
pub mod split;

#[cfg(test)]
mod split_props;

pub use error::AmountError;
pub use parse::{parse_amount, parse_percent};
pub use rounding::round_half_away_from_zero;
pub use split::{TaxSplit, combine_net_and_tax_to_gross, gross_from_net, split_gross_to_net_and_tax};
