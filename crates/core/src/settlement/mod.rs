//! Payment tracking for invoices and bills.
//!
//! Status, outstanding balance and lateness are pure functions of a
//! document's amount due and the payments recorded against it. The stored
//! status column is only a cached projection of [`SettlementEngine::state`].

pub mod engine;
pub mod error;
pub mod status;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::SettlementEngine;
pub use error::SettlementError;
pub use status::{DocumentStatus, SettlementStatus};
pub use types::{
    CounterpartyKind, DocumentKind, DocumentSnapshot, NewPaymentRecord, PaymentLine,
    PaymentRequest, PlannedPayment, SettlementState,
};
