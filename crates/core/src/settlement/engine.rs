//! Settlement computations.

use chrono::NaiveDate;
use fidu_shared::Cents;

use super::error::SettlementError;
use super::status::SettlementStatus;
use super::types::{
    DocumentSnapshot, NewPaymentRecord, PaymentLine, PaymentRequest, PlannedPayment,
    SettlementState,
};

/// Derives balances and status from recorded payments.
///
/// Holds no state; callers pass a fresh snapshot and payment list read in
/// the same transaction that will write the result.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Sum of all payment amounts. May exceed the amount due; saturates at
    /// `i64::MAX`.
    #[must_use]
    pub fn total_paid(payments: &[PaymentLine]) -> Cents {
        payments.iter().map(|p| p.amount).sum()
    }

    /// `max(0, amount_due - total_paid)`.
    #[must_use]
    pub fn outstanding(amount_due: Cents, total_paid: Cents) -> Cents {
        (amount_due - total_paid).non_negative()
    }

    /// Derives the status from the amount due and the sum of payments.
    #[must_use]
    pub fn status(amount_due: Cents, total_paid: Cents) -> SettlementStatus {
        SettlementStatus::from_amounts(amount_due, total_paid)
    }

    /// Calendar days between `due_date` and `today` while money is owed.
    ///
    /// Returns 0 when nothing is outstanding or the due date has not passed.
    #[must_use]
    pub fn days_late(due_date: NaiveDate, outstanding: Cents, today: NaiveDate) -> i64 {
        if !outstanding.is_positive() || due_date >= today {
            return 0;
        }
        today.signed_duration_since(due_date).num_days()
    }

    /// Computes the full settlement state of a document.
    #[must_use]
    pub fn state(document: &DocumentSnapshot, payments: &[PaymentLine]) -> SettlementState {
        let amount_due = document.amount_due();
        let total_paid = Self::total_paid(payments);
        let status = Self::status(amount_due, total_paid);

        let paid_at = if status == SettlementStatus::Paid {
            Self::completion_date(amount_due, payments)
        } else {
            None
        };

        SettlementState {
            total_paid,
            outstanding: Self::outstanding(amount_due, total_paid),
            status,
            paid_at,
        }
    }

    /// Validates a payment request against the live payment list.
    ///
    /// An omitted amount defaults to the current outstanding balance.
    ///
    /// # Errors
    ///
    /// - `DocumentCanceled` if the document is canceled
    /// - `InvalidPaymentAmount` if the resulting amount is not positive, or
    ///   if adding it would overflow the total paid
    pub fn plan_payment(
        document: &DocumentSnapshot,
        payments: &[PaymentLine],
        request: PaymentRequest,
    ) -> Result<PlannedPayment, SettlementError> {
        if document.canceled {
            return Err(SettlementError::DocumentCanceled(document.id));
        }

        let amount = match request.amount {
            Some(amount) => amount,
            None => Self::state(document, payments).outstanding,
        };
        if !amount.is_positive() {
            return Err(SettlementError::InvalidPaymentAmount(amount));
        }
        if Self::total_paid(payments).checked_add(amount).is_none() {
            return Err(SettlementError::InvalidPaymentAmount(amount));
        }

        let payment = NewPaymentRecord {
            document_id: document.id,
            amount,
            date: request.date,
            method: request.method,
            reference: request.reference,
        };

        let mut lines = payments.to_vec();
        lines.push(payment.line());
        let after = Self::state(document, &lines);

        Ok(PlannedPayment { payment, after })
    }

    /// Date of the payment whose running total first covers `amount_due`.
    fn completion_date(amount_due: Cents, payments: &[PaymentLine]) -> Option<NaiveDate> {
        let mut ordered = payments.to_vec();
        ordered.sort_by_key(|p| p.date);

        let mut running = Cents::ZERO;
        ordered.into_iter().find_map(|p| {
            running = running.saturating_add(p.amount);
            (running >= amount_due).then_some(p.date)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidu_shared::types::DocumentId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(gross: i64) -> DocumentSnapshot {
        DocumentSnapshot {
            id: DocumentId::new(),
            gross: Cents(gross),
            discount: Cents::ZERO,
            canceled: false,
            due_date: date(2026, 1, 10),
        }
    }

    fn pay(amount: Option<i64>, on: NaiveDate) -> PaymentRequest {
        PaymentRequest {
            amount: amount.map(Cents),
            date: on,
            method: None,
            reference: None,
        }
    }

    #[test]
    fn test_two_payments_settle_invoice() {
        let doc = invoice(100_000);

        let first = SettlementEngine::plan_payment(&doc, &[], pay(Some(30_000), date(2026, 1, 5)))
            .unwrap();
        assert_eq!(first.after.status, SettlementStatus::Partial);
        assert_eq!(first.after.outstanding, Cents(70_000));
        assert_eq!(first.after.paid_at, None);

        let lines = [first.payment.line()];
        assert_eq!(
            SettlementEngine::days_late(doc.due_date, first.after.outstanding, date(2026, 1, 15)),
            5
        );

        let second =
            SettlementEngine::plan_payment(&doc, &lines, pay(Some(70_000), date(2026, 1, 20)))
                .unwrap();
        assert_eq!(second.after.status, SettlementStatus::Paid);
        assert_eq!(second.after.outstanding, Cents::ZERO);
        assert_eq!(second.after.paid_at, Some(date(2026, 1, 20)));
        assert_eq!(
            SettlementEngine::days_late(doc.due_date, second.after.outstanding, date(2026, 3, 1)),
            0
        );
    }

    #[test]
    fn test_omitted_amount_pays_remainder() {
        let doc = invoice(100_000);
        let prior = [PaymentLine {
            amount: Cents(25_000),
            date: date(2026, 1, 2),
        }];

        let planned = SettlementEngine::plan_payment(&doc, &prior, pay(None, date(2026, 1, 8)))
            .unwrap();
        assert_eq!(planned.payment.amount, Cents(75_000));
        assert_eq!(planned.after.status, SettlementStatus::Paid);
    }

    #[test]
    fn test_omitted_amount_on_paid_document_is_rejected() {
        let doc = invoice(10_000);
        let prior = [PaymentLine {
            amount: Cents(10_000),
            date: date(2026, 1, 2),
        }];

        let err = SettlementEngine::plan_payment(&doc, &prior, pay(None, date(2026, 1, 8)))
            .unwrap_err();
        assert_eq!(err, SettlementError::InvalidPaymentAmount(Cents::ZERO));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let doc = invoice(10_000);
        for amount in [0, -1, -10_000] {
            let err =
                SettlementEngine::plan_payment(&doc, &[], pay(Some(amount), date(2026, 1, 1)))
                    .unwrap_err();
            assert!(matches!(err, SettlementError::InvalidPaymentAmount(_)));
        }
    }

    #[test]
    fn test_canceled_checked_before_amount() {
        let mut doc = invoice(10_000);
        doc.canceled = true;

        let err = SettlementEngine::plan_payment(&doc, &[], pay(Some(-5), date(2026, 1, 1)))
            .unwrap_err();
        assert_eq!(err, SettlementError::DocumentCanceled(doc.id));
    }

    #[test]
    fn test_payment_overflowing_total_is_rejected() {
        let doc = invoice(10_000);
        let prior = [PaymentLine {
            amount: Cents(i64::MAX),
            date: date(2026, 1, 2),
        }];

        let err = SettlementEngine::plan_payment(&doc, &prior, pay(Some(1), date(2026, 1, 3)))
            .unwrap_err();
        assert_eq!(err, SettlementError::InvalidPaymentAmount(Cents(1)));
    }

    #[test]
    fn test_overpayment_accumulates() {
        let doc = invoice(10_000);
        let planned =
            SettlementEngine::plan_payment(&doc, &[], pay(Some(12_500), date(2026, 1, 1)))
                .unwrap();
        assert_eq!(planned.after.total_paid, Cents(12_500));
        assert_eq!(planned.after.outstanding, Cents::ZERO);
        assert_eq!(planned.after.status, SettlementStatus::Paid);
    }

    #[test]
    fn test_discount_reduces_amount_due() {
        let mut doc = invoice(100_000);
        doc.discount = Cents(2_000);
        let lines = [PaymentLine {
            amount: Cents(98_000),
            date: date(2026, 1, 3),
        }];

        let state = SettlementEngine::state(&doc, &lines);
        assert_eq!(state.status, SettlementStatus::Paid);
        assert_eq!(state.paid_at, Some(date(2026, 1, 3)));
    }

    #[test]
    fn test_paid_at_uses_payment_order_by_date() {
        let doc = invoice(100);
        let lines = [
            PaymentLine {
                amount: Cents(60),
                date: date(2026, 2, 1),
            },
            PaymentLine {
                amount: Cents(60),
                date: date(2026, 1, 1),
            },
        ];
        assert_eq!(
            SettlementEngine::state(&doc, &lines).paid_at,
            Some(date(2026, 2, 1))
        );
    }

    #[test]
    fn test_zero_gross_is_paid_without_payments() {
        let state = SettlementEngine::state(&invoice(0), &[]);
        assert_eq!(state.status, SettlementStatus::Paid);
        assert_eq!(state.paid_at, None);
    }

    #[test]
    fn test_days_late_not_yet_due() {
        let due = date(2026, 1, 10);
        assert_eq!(SettlementEngine::days_late(due, Cents(1), due), 0);
        assert_eq!(SettlementEngine::days_late(due, Cents(1), date(2026, 1, 9)), 0);
        assert_eq!(SettlementEngine::days_late(due, Cents(1), date(2026, 1, 11)), 1);
    }
}
