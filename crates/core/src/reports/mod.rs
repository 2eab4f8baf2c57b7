//! Receivables, payables and VAT reports.
//!
//! Reports only aggregate; every per-document figure comes from
//! [`crate::settlement::SettlementEngine`]. Canceled documents never count.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
