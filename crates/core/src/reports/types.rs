//! Report data types.

use chrono::NaiveDate;
use fidu_shared::Cents;
use fidu_shared::types::CounterpartyId;
use serde::{Deserialize, Serialize};

/// A document as seen by the receivables report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// Client or supplier.
    pub counterparty_id: CounterpartyId,
    /// Display name of the counterparty.
    pub counterparty_name: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Gross minus discount.
    pub amount_due: Cents,
    /// Sum of recorded payments.
    pub total_paid: Cents,
    /// Canceled documents are skipped.
    pub canceled: bool,
}

/// Lateness bracket of an outstanding amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Not yet due.
    Current,
    /// 1 to 30 days late.
    Days1To30,
    /// 31 to 60 days late.
    Days31To60,
    /// 61 to 90 days late.
    Days61To90,
    /// More than 90 days late.
    Over90,
}

impl AgingBucket {
    /// Bracket for a number of days late.
    #[must_use]
    pub const fn for_days_late(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::Current,
            1..=30 => Self::Days1To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

/// Outstanding amounts per lateness bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    /// Not yet due.
    pub current: Cents,
    /// 1-30 days late.
    pub days_1_30: Cents,
    /// 31-60 days late.
    pub days_31_60: Cents,
    /// 61-90 days late.
    pub days_61_90: Cents,
    /// 90+ days late.
    pub over_90: Cents,
}

impl AgingBuckets {
    /// Adds an amount to a bracket.
    pub fn add(&mut self, bucket: AgingBucket, amount: Cents) {
        let slot = match bucket {
            AgingBucket::Current => &mut self.current,
            AgingBucket::Days1To30 => &mut self.days_1_30,
            AgingBucket::Days31To60 => &mut self.days_31_60,
            AgingBucket::Days61To90 => &mut self.days_61_90,
            AgingBucket::Over90 => &mut self.over_90,
        };
        *slot += amount;
    }

    /// Sum over all brackets.
    #[must_use]
    pub fn total(&self) -> Cents {
        self.current + self.days_1_30 + self.days_31_60 + self.days_61_90 + self.over_90
    }
}

/// What one counterparty owes (or is owed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyBalance {
    /// Counterparty ID.
    pub counterparty_id: CounterpartyId,
    /// Counterparty name.
    pub name: String,
    /// Documents with a remaining balance.
    pub open_documents: u32,
    /// Remaining balance.
    pub outstanding: Cents,
    /// Part of the balance past its due date.
    pub overdue: Cents,
    /// Lateness of the oldest overdue document.
    pub max_days_late: i64,
}

/// Outstanding balances for invoices (receivables) or bills (payables).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivablesReport {
    /// Evaluation date.
    pub as_of: NaiveDate,
    /// Per-counterparty rows, largest balance first.
    pub counterparties: Vec<CounterpartyBalance>,
    /// Sum of all outstanding balances.
    pub total_outstanding: Cents,
    /// Sum of overdue balances.
    pub total_overdue: Cents,
    /// Number of documents with a remaining balance.
    pub open_documents: u32,
    /// Outstanding balance by lateness.
    pub aging: AgingBuckets,
}

/// Net and VAT of one taxed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatLine {
    /// Net amount.
    pub net: Cents,
    /// VAT amount.
    pub tax: Cents,
    /// Canceled records are skipped.
    pub canceled: bool,
}

/// Totals of one side of the VAT return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatTotals {
    /// Number of records counted.
    pub count: u32,
    /// Net total.
    pub net: Cents,
    /// VAT total.
    pub tax: Cents,
    /// Gross total.
    pub gross: Cents,
}

/// VAT collected on sales against VAT paid on expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSummary {
    /// First day of the period.
    pub from: NaiveDate,
    /// Last day of the period.
    pub to: NaiveDate,
    /// Output VAT on invoices.
    pub collected: VatTotals,
    /// Input VAT on expenses.
    pub deductible: VatTotals,
    /// `collected.tax - deductible.tax`; negative means a refund.
    pub vat_payable: Cents,
}
