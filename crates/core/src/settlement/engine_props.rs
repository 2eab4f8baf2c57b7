//! Property-based tests for the settlement engine.

use chrono::{Duration, NaiveDate};
use fidu_shared::Cents;
use fidu_shared::types::DocumentId;
use proptest::prelude::*;

use super::engine::SettlementEngine;
use super::status::SettlementStatus;
use super::types::{DocumentSnapshot, PaymentLine, PaymentRequest};

fn amount() -> impl Strategy<Value = Cents> {
    (0i64..1_000_000_000i64).prop_map(Cents)
}

fn positive_amount() -> impl Strategy<Value = Cents> {
    (1i64..100_000_000i64).prop_map(Cents)
}

fn day() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn document(gross: Cents, due_date: NaiveDate) -> DocumentSnapshot {
    DocumentSnapshot {
        id: DocumentId::new(),
        gross,
        discount: Cents::ZERO,
        canceled: false,
        due_date,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every (gross, paid) pair maps to exactly the expected status.
    #[test]
    fn prop_status_is_total(gross in amount(), paid in amount()) {
        let status = SettlementEngine::status(gross, paid);
        let expected = if paid >= gross {
            SettlementStatus::Paid
        } else if paid.is_zero() {
            SettlementStatus::Open
        } else {
            SettlementStatus::Partial
        };
        prop_assert_eq!(status, expected);
    }

    /// Outstanding never goes negative, even when overpaid.
    #[test]
    fn prop_outstanding_non_negative(gross in amount(), paid in amount()) {
        let outstanding = SettlementEngine::outstanding(gross, paid);
        prop_assert!(!outstanding.is_negative());
        prop_assert!(outstanding <= gross);
    }

    /// A settled document is never late, however far past due.
    #[test]
    fn prop_settled_documents_are_never_late(
        due in day(),
        days_after in 0i64..100_000,
    ) {
        let today = due + Duration::days(days_after);
        prop_assert_eq!(SettlementEngine::days_late(due, Cents::ZERO, today), 0);
    }

    /// Lateness is the plain calendar-day difference while money is owed.
    #[test]
    fn prop_days_late_counts_calendar_days(
        due in day(),
        days_after in 1i64..5_000,
        owed in positive_amount(),
    ) {
        let today = due + Duration::days(days_after);
        prop_assert_eq!(SettlementEngine::days_late(due, owed, today), days_after);
    }

    /// Paying the remainder always closes the document.
    #[test]
    fn prop_paying_remainder_settles(
        gross in positive_amount(),
        partial in prop::collection::vec(1i64..10_000_000, 0..5),
        on in day(),
    ) {
        let doc = document(gross, on);
        let lines: Vec<PaymentLine> = partial
            .into_iter()
            .map(|amount| PaymentLine { amount: Cents(amount), date: on })
            .collect();
        let before = SettlementEngine::state(&doc, &lines);

        let request = PaymentRequest { amount: None, date: on, method: None, reference: None };
        match SettlementEngine::plan_payment(&doc, &lines, request) {
            Ok(planned) => {
                prop_assert_eq!(planned.payment.amount, before.outstanding);
                prop_assert_eq!(planned.after.status, SettlementStatus::Paid);
                prop_assert_eq!(planned.after.outstanding, Cents::ZERO);
                prop_assert_eq!(planned.after.paid_at, Some(on));
            }
            Err(_) => prop_assert!(before.outstanding.is_zero()),
        }
    }

    /// Total paid grows by exactly the recorded amount.
    #[test]
    fn prop_payment_adds_to_total(
        gross in positive_amount(),
        first in positive_amount(),
        second in positive_amount(),
        on in day(),
    ) {
        let doc = document(gross, on);
        let lines = [PaymentLine { amount: first, date: on }];
        let request = PaymentRequest {
            amount: Some(second),
            date: on,
            method: None,
            reference: None,
        };

        let planned = SettlementEngine::plan_payment(&doc, &lines, request).unwrap();
        prop_assert_eq!(planned.after.total_paid, first + second);
    }
}
