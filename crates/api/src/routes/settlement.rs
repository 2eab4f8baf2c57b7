//! Payment and discounted settlement routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::NaiveDate;
use fidu_core::discount::{DiscountTerms, SettlementRequest};
use fidu_core::settlement::PaymentRequest;
use fidu_db::repositories::{SettlementOutcome, SettlementRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::documents::{DocumentResponse, PaymentResponse};
use crate::{
    AppState,
    error::ApiError,
    money::{AmountInput, RateInput},
};

/// Creates the settlement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents/{id}/payments", post(record_payment))
        .route("/documents/{id}/settle", post(settle_document))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Amount; the outstanding balance when omitted.
    pub amount: Option<AmountInput>,
    /// Payment date; today when omitted.
    pub date: Option<NaiveDate>,
    /// Payment method.
    pub method: Option<String>,
    /// External reference.
    pub reference: Option<String>,
}

/// Request body for settling with a discount.
///
/// Exactly one of `discount_rate` and `paid_amount` must be given.
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    /// Discount on the original gross, e.g. `"2%"` or `200`.
    pub discount_rate: Option<RateInput>,
    /// Cash accepted now as final payment.
    pub paid_amount: Option<AmountInput>,
    /// Settlement date; today when omitted.
    pub date: Option<NaiveDate>,
    /// Payment method.
    pub method: Option<String>,
    /// External reference.
    pub reference: Option<String>,
}

impl SettleRequest {
    /// Resolves the discount terms.
    ///
    /// # Errors
    ///
    /// Returns 400 unless exactly one form is given and it parses.
    pub fn terms(&self) -> Result<DiscountTerms, ApiError> {
        match (&self.discount_rate, &self.paid_amount) {
            (Some(rate), None) => Ok(DiscountTerms::Rate(rate.basis_points()?)),
            (None, Some(amount)) => Ok(DiscountTerms::CustomPaid(amount.cents()?)),
            _ => Err(ApiError::bad_request(
                "INVALID_SETTLEMENT_TERMS",
                "Provide either discount_rate or paid_amount",
            )),
        }
    }
}

/// Response for a payment or settlement.
#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    /// Document after the update.
    pub document: DocumentResponse,
    /// Inserted payment, if any.
    pub payment: Option<PaymentResponse>,
}

impl From<SettlementOutcome> for SettlementResponse {
    fn from(outcome: SettlementOutcome) -> Self {
        Self {
            document: outcome.document.into(),
            payment: outcome.payment.map(Into::into),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/documents/{id}/payments` - Record a payment.
async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = payload.amount.as_ref().map(AmountInput::cents).transpose()?;
    let request = PaymentRequest {
        amount,
        date: payload.date.unwrap_or_else(|| state.today()),
        method: payload.method,
        reference: payload.reference,
    };

    let repo = SettlementRepository::new((*state.db).clone());
    let outcome = repo.record_payment(id, request).await?;

    Ok((StatusCode::CREATED, Json(SettlementResponse::from(outcome))))
}

/// POST `/documents/{id}/settle` - Close a document with a discount.
async fn settle_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SettleRequest>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let terms = payload.terms()?;
    let request = SettlementRequest {
        date: payload.date.unwrap_or_else(|| state.today()),
        method: payload.method,
        reference: payload.reference,
    };

    let repo = SettlementRepository::new((*state.db).clone());
    let outcome = repo.settle_with_discount(id, terms, request).await?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidu_shared::Cents;

    fn settle(json: &str) -> SettleRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_terms_from_rate() {
        let terms = settle(r#"{"discount_rate": "2%"}"#).terms().unwrap();
        assert!(matches!(terms, DiscountTerms::Rate(bp) if bp.value() == 200));
    }

    #[test]
    fn test_terms_from_paid_amount() {
        let terms = settle(r#"{"paid_amount": "3'000.00"}"#).terms().unwrap();
        assert_eq!(terms, DiscountTerms::CustomPaid(Cents(300_000)));
    }

    #[test]
    fn test_terms_need_exactly_one_form() {
        let both = settle(r#"{"discount_rate": 200, "paid_amount": "10"}"#);
        assert_eq!(both.terms().unwrap_err().code(), "INVALID_SETTLEMENT_TERMS");

        let neither = settle("{}");
        assert_eq!(neither.terms().unwrap_err().code(), "INVALID_SETTLEMENT_TERMS");
    }

    #[test]
    fn test_unparseable_paid_amount_is_rejected() {
        let err = settle(r#"{"paid_amount": "ten"}"#).terms().unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");
    }
}
