//! Property-based tests for discount settlements.

use chrono::NaiveDate;
use fidu_shared::types::DocumentId;
use fidu_shared::{BasisPoints, Cents};
use proptest::prelude::*;

use super::calculator::{DiscountCalculator, DiscountTerms, SettlementRequest};
use crate::settlement::{DocumentSnapshot, PaymentLine, SettlementStatus};

fn gross_amount() -> impl Strategy<Value = Cents> {
    (0i64..10_000_000_000i64).prop_map(Cents)
}

fn rate() -> impl Strategy<Value = BasisPoints> {
    (0u32..=BasisPoints::MAX).prop_map(|bp| BasisPoints::new(bp).unwrap())
}

fn terms() -> impl Strategy<Value = DiscountTerms> {
    prop_oneof![
        rate().prop_map(DiscountTerms::Rate),
        (0i64..20_000_000i64).prop_map(|c| DiscountTerms::CustomPaid(Cents(c))),
    ]
}

fn settle_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The discount never exceeds gross and the paid part never goes negative.
    #[test]
    fn prop_discount_is_clamped(gross in gross_amount(), rate in rate()) {
        let outcome = DiscountCalculator::apply_discount_rate(gross, rate);

        prop_assert!(outcome.discount <= gross);
        prop_assert!(!outcome.discount.is_negative());
        prop_assert!(!outcome.paid.is_negative());
        prop_assert_eq!(outcome.paid + outcome.discount, gross);
    }

    /// A custom amount never records more than gross.
    #[test]
    fn prop_custom_amount_is_clamped(gross in gross_amount(), custom in gross_amount()) {
        let outcome = DiscountCalculator::apply_custom_paid_amount(gross, custom);

        prop_assert!(outcome.paid <= gross);
        prop_assert_eq!(outcome.paid + outcome.discount, gross);
    }

    /// A settlement always closes the document, whatever was paid before.
    #[test]
    fn prop_settlement_always_pays_document(
        gross in 0i64..10_000_000i64,
        prior in prop::collection::vec(1i64..5_000_000, 0..4),
        terms in terms(),
    ) {
        let document = DocumentSnapshot {
            id: DocumentId::new(),
            gross: Cents(gross),
            discount: Cents::ZERO,
            canceled: false,
            due_date: settle_date(),
        };
        let payments: Vec<PaymentLine> = prior
            .iter()
            .map(|&amount| PaymentLine { amount: Cents(amount), date: settle_date() })
            .collect();
        let request = SettlementRequest { date: settle_date(), method: None, reference: None };

        let planned =
            DiscountCalculator::plan_settlement(&document, &payments, terms, request).unwrap();

        prop_assert_eq!(planned.after.status, SettlementStatus::Paid);
        prop_assert_eq!(planned.after.outstanding, Cents::ZERO);
        prop_assert!(planned.discount <= Cents(gross));
        prop_assert!(!planned.discount.is_negative());
        if let Some(payment) = &planned.payment {
            prop_assert!(payment.amount.is_positive());
        }
    }
}
