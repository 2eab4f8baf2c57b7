//! Early-payment discounts and negotiated final amounts.
//!
//! A discount settlement closes a document in one step: it records at most
//! one additional payment and books the rest of the amount due as discount.

pub mod calculator;

#[cfg(test)]
mod calculator_props;

pub use calculator::{
    DiscountCalculator, DiscountOutcome, DiscountTerms, PlannedSettlement, SettlementRequest,
};
