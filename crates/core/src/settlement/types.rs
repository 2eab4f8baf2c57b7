//! Inputs and outputs of the settlement engine.

use chrono::NaiveDate;
use fidu_shared::Cents;
use fidu_shared::types::DocumentId;
use serde::{Deserialize, Serialize};

use super::status::SettlementStatus;

/// Which side of the business a document sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Issued to a client; money comes in.
    Invoice,
    /// Received from a supplier; money goes out.
    Bill,
}

impl DocumentKind {
    /// The counterparty kind this document may reference.
    #[must_use]
    pub const fn counterparty_kind(self) -> CounterpartyKind {
        match self {
            Self::Invoice => CounterpartyKind::Client,
            Self::Bill => CounterpartyKind::Supplier,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Bill => "bill",
        }
    }
}

/// A client or a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterpartyKind {
    /// Receives invoices.
    Client,
    /// Sends bills.
    Supplier,
}

impl CounterpartyKind {
    /// The document kind issued against this counterparty kind.
    #[must_use]
    pub const fn document_kind(self) -> DocumentKind {
        match self {
            Self::Client => DocumentKind::Invoice,
            Self::Supplier => DocumentKind::Bill,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Supplier => "supplier",
        }
    }
}

/// The part of an invoice or bill the engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// Document id.
    pub id: DocumentId,
    /// Tax-inclusive total.
    pub gross: Cents,
    /// Discount already granted on settlement.
    pub discount: Cents,
    /// Whether the document was canceled.
    pub canceled: bool,
    /// Due date.
    pub due_date: NaiveDate,
}

impl DocumentSnapshot {
    /// Gross minus discount, never below zero.
    #[must_use]
    pub fn amount_due(&self) -> Cents {
        (self.gross - self.discount).non_negative()
    }
}

/// One recorded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentLine {
    /// Paid amount.
    pub amount: Cents,
    /// Payment date.
    pub date: NaiveDate,
}

/// A request to record a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount to record; `None` pays the remaining balance.
    pub amount: Option<Cents>,
    /// Payment date.
    pub date: NaiveDate,
    /// How the money moved (bank transfer, cash, ...).
    pub method: Option<String>,
    /// Bank or voucher reference.
    pub reference: Option<String>,
}

/// A payment ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPaymentRecord {
    /// Owning document.
    pub document_id: DocumentId,
    /// Paid amount, always positive.
    pub amount: Cents,
    /// Payment date.
    pub date: NaiveDate,
    /// Payment method.
    pub method: Option<String>,
    /// Payment reference.
    pub reference: Option<String>,
}

impl NewPaymentRecord {
    /// The payment as a line for further computations.
    #[must_use]
    pub const fn line(&self) -> PaymentLine {
        PaymentLine {
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Derived settlement figures of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettlementState {
    /// Sum of all payments, may exceed the amount due.
    pub total_paid: Cents,
    /// Remaining balance, never negative.
    pub outstanding: Cents,
    /// Derived status.
    pub status: SettlementStatus,
    /// Date of the payment that completed the document.
    pub paid_at: Option<NaiveDate>,
}

/// A validated payment together with the state it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPayment {
    /// The payment to insert.
    pub payment: NewPaymentRecord,
    /// State once the payment is recorded.
    pub after: SettlementState,
}
