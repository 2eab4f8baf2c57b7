//! Tests for the reports module.

use chrono::{Duration, NaiveDate};
use fidu_shared::Cents;
use fidu_shared::types::CounterpartyId;
use proptest::prelude::*;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{AgingBucket, ReportDocument, VatLine};
use crate::settlement::SettlementEngine;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

fn doc(
    counterparty: CounterpartyId,
    name: &str,
    days_past_due: i64,
    due: i64,
    paid: i64,
    canceled: bool,
) -> ReportDocument {
    ReportDocument {
        counterparty_id: counterparty,
        counterparty_name: name.to_string(),
        due_date: as_of() - Duration::days(days_past_due),
        amount_due: Cents(due),
        total_paid: Cents(paid),
        canceled,
    }
}

#[test]
fn test_receivables_group_by_counterparty() {
    let acme = CounterpartyId::new();
    let globex = CounterpartyId::new();
    let documents = vec![
        doc(acme, "Acme", 10, 100_000, 30_000, false),
        doc(acme, "Acme", -5, 50_000, 0, false),
        doc(globex, "Globex", 95, 20_000, 0, false),
        doc(globex, "Globex", 40, 80_000, 80_000, false),
        doc(globex, "Globex", 200, 999_999, 0, true),
    ];

    let report = ReportService::receivables(&documents, as_of());

    assert_eq!(report.total_outstanding, Cents(140_000));
    assert_eq!(report.total_overdue, Cents(90_000));
    assert_eq!(report.open_documents, 3);
    assert_eq!(report.counterparties.len(), 2);

    let first = &report.counterparties[0];
    assert_eq!(first.name, "Acme");
    assert_eq!(first.outstanding, Cents(120_000));
    assert_eq!(first.overdue, Cents(70_000));
    assert_eq!(first.max_days_late, 10);
    assert_eq!(first.open_documents, 2);

    let second = &report.counterparties[1];
    assert_eq!(second.name, "Globex");
    assert_eq!(second.outstanding, Cents(20_000));
    assert_eq!(second.max_days_late, 95);

    assert_eq!(report.aging.current, Cents(50_000));
    assert_eq!(report.aging.days_1_30, Cents(70_000));
    assert_eq!(report.aging.over_90, Cents(20_000));
    assert_eq!(report.aging.total(), report.total_outstanding);
}

#[test]
fn test_overpaid_document_adds_nothing() {
    let client = CounterpartyId::new();
    let documents = vec![doc(client, "Overpayer", 3, 10_000, 15_000, false)];

    let report = ReportService::receivables(&documents, as_of());
    assert!(report.counterparties.is_empty());
    assert_eq!(report.total_outstanding, Cents::ZERO);
}

#[test]
fn test_aging_bucket_edges() {
    assert_eq!(AgingBucket::for_days_late(-3), AgingBucket::Current);
    assert_eq!(AgingBucket::for_days_late(0), AgingBucket::Current);
    assert_eq!(AgingBucket::for_days_late(1), AgingBucket::Days1To30);
    assert_eq!(AgingBucket::for_days_late(30), AgingBucket::Days1To30);
    assert_eq!(AgingBucket::for_days_late(31), AgingBucket::Days31To60);
    assert_eq!(AgingBucket::for_days_late(61), AgingBucket::Days61To90);
    assert_eq!(AgingBucket::for_days_late(91), AgingBucket::Over90);
}

#[test]
fn test_vat_summary() {
    let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
    let sales = [
        VatLine { net: Cents(9_251), tax: Cents(749), canceled: false },
        VatLine { net: Cents(100_000), tax: Cents(8_100), canceled: false },
        VatLine { net: Cents(50_000), tax: Cents(4_050), canceled: true },
    ];
    let expenses = [VatLine { net: Cents(10_000), tax: Cents(810), canceled: false }];

    let summary = ReportService::vat_summary(from, to, &sales, &expenses).unwrap();

    assert_eq!(summary.collected.count, 2);
    assert_eq!(summary.collected.tax, Cents(8_849));
    assert_eq!(summary.collected.gross, Cents(118_100));
    assert_eq!(summary.deductible.tax, Cents(810));
    assert_eq!(summary.vat_payable, Cents(8_039));
}

#[test]
fn test_vat_refund_is_negative() {
    let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let expenses = [VatLine { net: Cents(10_000), tax: Cents(810), canceled: false }];

    let summary = ReportService::vat_summary(day, day, &[], &expenses).unwrap();
    assert_eq!(summary.vat_payable, Cents(-810));
}

#[test]
fn test_vat_rejects_inverted_range() {
    let from = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    let err = ReportService::vat_summary(from, to, &[], &[]).unwrap_err();
    assert_eq!(err, ReportError::InvalidDateRange { start: from, end: to });
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
}

fn report_document() -> impl Strategy<Value = ReportDocument> {
    (0usize..4, -60i64..200, 0i64..1_000_000, 0i64..1_200_000, any::<bool>()).prop_map(
        |(party, days_past_due, due, paid, canceled)| ReportDocument {
            counterparty_id: CounterpartyId::from_uuid(uuid::Uuid::from_u128(party as u128 + 1)),
            counterparty_name: format!("Party {party}"),
            due_date: as_of() - Duration::days(days_past_due),
            amount_due: Cents(due),
            total_paid: Cents(paid),
            canceled,
        },
    )
}

proptest! {
    /// Report totals equal the sum of `outstanding` over non-canceled documents.
    #[test]
    fn prop_total_is_sum_of_outstanding(
        documents in prop::collection::vec(report_document(), 0..30),
    ) {
        let expected: Cents = documents
            .iter()
            .filter(|d| !d.canceled)
            .map(|d| SettlementEngine::outstanding(d.amount_due, d.total_paid))
            .sum();

        let report = ReportService::receivables(&documents, as_of());

        prop_assert_eq!(report.total_outstanding, expected);
        prop_assert_eq!(report.aging.total(), expected);
        prop_assert!(report.total_overdue <= report.total_outstanding);
        prop_assert!(report.counterparties.iter().all(|c| c.outstanding.is_positive()));
    }

    /// Canceled documents never change the report.
    #[test]
    fn prop_canceled_documents_ignored(
        documents in prop::collection::vec(report_document(), 0..20),
    ) {
        let active: Vec<ReportDocument> =
            documents.iter().filter(|d| !d.canceled).cloned().collect();

        prop_assert_eq!(
            ReportService::receivables(&documents, as_of()),
            ReportService::receivables(&active, as_of())
        );
    }
}
