//! Discount computation and one-shot settlement planning.

use chrono::NaiveDate;
use fidu_shared::{BasisPoints, Cents};
use serde::{Deserialize, Serialize};

use crate::settlement::{
    DocumentSnapshot, NewPaymentRecord, PaymentLine, SettlementEngine, SettlementError,
    SettlementState,
};
use crate::tax::round_half_away_from_zero;

const BP_SCALE: i128 = BasisPoints::MAX as i128;

/// Cash received and discount granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountOutcome {
    /// Cash actually paid.
    pub paid: Cents,
    /// Amount waived.
    pub discount: Cents,
}

/// How a settlement is discounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum DiscountTerms {
    /// A percentage of the original gross amount.
    Rate(BasisPoints),
    /// The amount the counterparty pays now; the rest is waived.
    CustomPaid(Cents),
}

/// Date and bookkeeping details of a settlement payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRequest {
    /// Settlement date.
    pub date: NaiveDate,
    /// Payment method.
    pub method: Option<String>,
    /// Payment reference.
    pub reference: Option<String>,
}

/// Result of planning a discount settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSettlement {
    /// Payment to insert, absent when prior payments already reach the target.
    pub payment: Option<NewPaymentRecord>,
    /// Discount to store on the document.
    pub discount: Cents,
    /// Rate the discount was derived from, if any.
    pub discount_rate: Option<BasisPoints>,
    /// State after the settlement; always paid.
    pub after: SettlementState,
}

/// Discount arithmetic.
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Applies a percentage discount to a gross amount.
    ///
    /// `discount = round(gross * rate)`, never more than `gross`.
    ///
    /// ```
    /// use fidu_core::discount::DiscountCalculator;
    /// use fidu_shared::{BasisPoints, Cents};
    ///
    /// let outcome = DiscountCalculator::apply_discount_rate(
    ///     Cents(100_000),
    ///     BasisPoints::new(200).unwrap(),
    /// );
    /// assert_eq!(outcome.discount, Cents(2_000));
    /// assert_eq!(outcome.paid, Cents(98_000));
    /// ```
    #[must_use]
    pub fn apply_discount_rate(gross: Cents, rate: BasisPoints) -> DiscountOutcome {
        let gross = gross.non_negative();
        let raw = round_half_away_from_zero(
            i128::from(gross.value()) * i128::from(rate.value()),
            BP_SCALE,
        );
        // raw <= gross because rate <= 100 %
        let discount = Cents(i64::try_from(raw).unwrap_or(gross.value())).min(gross);

        DiscountOutcome {
            paid: gross - discount,
            discount,
        }
    }

    /// Settles for a negotiated amount.
    ///
    /// The paid amount is clamped to `0..=gross`; the remainder is discount.
    #[must_use]
    pub fn apply_custom_paid_amount(gross: Cents, custom_paid: Cents) -> DiscountOutcome {
        let gross = gross.non_negative();
        let paid = custom_paid.non_negative().min(gross);

        DiscountOutcome {
            paid,
            discount: (gross - paid).non_negative(),
        }
    }

    /// Plans a one-shot settlement on top of any prior payments.
    ///
    /// With a rate, the discount is taken on the original gross and only the
    /// cash still missing to reach the discounted target is paid. With a
    /// custom amount, the cash is clamped to the remaining balance and the
    /// rest of that balance is waived.
    ///
    /// # Errors
    ///
    /// - `DocumentCanceled` if the document is canceled
    /// - `InvalidPaymentAmount` if a custom amount is negative
    pub fn plan_settlement(
        document: &DocumentSnapshot,
        payments: &[PaymentLine],
        terms: DiscountTerms,
        request: SettlementRequest,
    ) -> Result<PlannedSettlement, SettlementError> {
        if document.canceled {
            return Err(SettlementError::DocumentCanceled(document.id));
        }

        let gross = document.gross.non_negative();
        let prior = SettlementEngine::total_paid(payments);

        let (additional, discount, discount_rate) = match terms {
            DiscountTerms::Rate(rate) => {
                let target = Self::apply_discount_rate(gross, rate).paid;
                let additional = (target - prior).non_negative();
                let discount = (gross - prior - additional).non_negative();
                (additional, discount, Some(rate))
            }
            DiscountTerms::CustomPaid(amount) => {
                if amount.is_negative() {
                    return Err(SettlementError::InvalidPaymentAmount(amount));
                }
                let remaining = (gross - prior).non_negative();
                let outcome = Self::apply_custom_paid_amount(remaining, amount);
                (outcome.paid, outcome.discount, None)
            }
        };

        let payment = additional.is_positive().then(|| NewPaymentRecord {
            document_id: document.id,
            amount: additional,
            date: request.date,
            method: request.method,
            reference: request.reference,
        });

        let settled = DocumentSnapshot {
            discount,
            ..document.clone()
        };
        let mut lines = payments.to_vec();
        lines.extend(payment.as_ref().map(NewPaymentRecord::line));

        let mut after = SettlementEngine::state(&settled, &lines);
        if after.paid_at.is_none() {
            after.paid_at = Some(request.date);
        }

        Ok(PlannedSettlement {
            payment,
            discount,
            discount_rate,
            after,
        })
    }
}
