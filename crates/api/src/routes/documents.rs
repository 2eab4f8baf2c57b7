//! Invoice and bill routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::{Days, NaiveDate};
use fidu_core::settlement::SettlementEngine;
use fidu_db::entities::{
    documents, payments,
    sea_orm_active_enums::{DocumentKind, DocumentStatus},
};
use fidu_db::repositories::{CreateDocumentInput, DocumentFilter, DocumentRepository};
use fidu_shared::Cents;
use fidu_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    money::{AmountInput, Money, RateInput, rate_or},
};

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/bills", get(list_bills).post(create_bill))
        .route("/documents/{id}", get(get_document))
        .route("/documents/{id}/gross", put(correct_gross))
        .route("/documents/{id}/cancel", post(cancel_document))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing invoices or bills.
#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    /// Filter by client or supplier.
    pub counterparty_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<DocumentStatus>,
    /// Only documents due on or before this date (YYYY-MM-DD).
    pub due_before: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating an invoice or bill.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    /// Client (invoice) or supplier (bill).
    pub counterparty_id: Uuid,
    /// Document number.
    pub number: String,
    /// Issue date; today when omitted.
    pub issue_date: Option<NaiveDate>,
    /// Due date; issue date plus the payment terms when omitted.
    pub due_date: Option<NaiveDate>,
    /// Tax-inclusive total, e.g. `"10'695.50"`.
    pub gross: AmountInput,
    /// VAT rate; the configured default when omitted.
    pub tax_rate: Option<RateInput>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for correcting the gross amount.
#[derive(Debug, Deserialize)]
pub struct CorrectGrossRequest {
    /// New tax-inclusive total.
    pub gross: AmountInput,
    /// New VAT rate; unchanged when omitted.
    pub tax_rate: Option<RateInput>,
}

/// Response for an invoice or bill.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    /// Document ID.
    pub id: Uuid,
    /// `invoice` or `bill`.
    pub kind: DocumentKind,
    /// Client or supplier ID.
    pub counterparty_id: Uuid,
    /// Document number.
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// VAT rate in basis points.
    pub tax_rate_bp: i32,
    /// Tax-inclusive total.
    pub gross: Money,
    /// Net amount.
    pub net: Money,
    /// VAT amount.
    pub tax: Money,
    /// Discount granted at settlement.
    pub discount: Money,
    /// Discount rate in basis points, if the discount was a rate.
    pub discount_rate_bp: Option<i32>,
    /// Gross minus discount.
    pub amount_due: Money,
    /// Sum of payments.
    pub paid: Money,
    /// Remaining balance.
    pub outstanding: Money,
    /// Status.
    pub status: DocumentStatus,
    /// Date the document became paid.
    pub paid_at: Option<NaiveDate>,
    /// Cancellation timestamp.
    pub canceled_at: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Row version.
    pub version: i64,
}

impl From<documents::Model> for DocumentResponse {
    fn from(m: documents::Model) -> Self {
        let amount_due = (Cents(m.gross_cents) - Cents(m.discount_cents)).non_negative();
        let outstanding = if m.status == DocumentStatus::Canceled {
            Cents::ZERO
        } else {
            SettlementEngine::outstanding(amount_due, Cents(m.paid_cents))
        };

        Self {
            id: m.id,
            kind: m.kind,
            counterparty_id: m.counterparty_id,
            number: m.number,
            issue_date: m.issue_date,
            due_date: m.due_date,
            tax_rate_bp: m.tax_rate_bp,
            gross: m.gross_cents.into(),
            net: m.net_cents.into(),
            tax: m.tax_cents.into(),
            discount: m.discount_cents.into(),
            discount_rate_bp: m.discount_rate_bp,
            amount_due: amount_due.into(),
            paid: m.paid_cents.into(),
            outstanding: outstanding.into(),
            status: m.status,
            paid_at: m.paid_at,
            canceled_at: m.canceled_at.map(|t| t.to_rfc3339()),
            notes: m.notes,
            version: m.version,
        }
    }
}

/// Response for a payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Payment date.
    pub paid_on: NaiveDate,
    /// Amount.
    pub amount: Money,
    /// Payment method.
    pub method: Option<String>,
    /// External reference.
    pub reference: Option<String>,
}

impl From<payments::Model> for PaymentResponse {
    fn from(m: payments::Model) -> Self {
        Self {
            id: m.id,
            paid_on: m.paid_on,
            amount: m.amount_cents.into(),
            method: m.method,
            reference: m.reference,
        }
    }
}

/// Response for a document with its payments.
#[derive(Debug, Serialize)]
pub struct DocumentDetailResponse {
    /// The document.
    #[serde(flatten)]
    pub document: DocumentResponse,
    /// Calendar days past due while a balance remains.
    pub days_late: i64,
    /// Payments, oldest first.
    pub payments: Vec<PaymentResponse>,
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn list_invoices(
    state: State<AppState>,
    query: Query<ListDocumentsQuery>,
) -> Result<Json<PageResponse<DocumentResponse>>, ApiError> {
    list_kind(state, DocumentKind::Invoice, query).await
}

async fn list_bills(
    state: State<AppState>,
    query: Query<ListDocumentsQuery>,
) -> Result<Json<PageResponse<DocumentResponse>>, ApiError> {
    list_kind(state, DocumentKind::Bill, query).await
}

async fn create_invoice(
    state: State<AppState>,
    payload: Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    create_kind(state, DocumentKind::Invoice, payload).await
}

async fn create_bill(
    state: State<AppState>,
    payload: Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    create_kind(state, DocumentKind::Bill, payload).await
}

async fn list_kind(
    State(state): State<AppState>,
    kind: DocumentKind,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<PageResponse<DocumentResponse>>, ApiError> {
    let repo = DocumentRepository::new((*state.db).clone());
    let filter = DocumentFilter {
        kind: Some(kind),
        counterparty_id: query.counterparty_id,
        status: query.status,
        due_on_or_before: query.due_before,
    };
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let result = repo.list(&filter, &page).await?;
    Ok(Json(result.map(DocumentResponse::from)))
}

async fn create_kind(
    State(state): State<AppState>,
    kind: DocumentKind,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let gross = payload.gross.cents()?;
    let tax_rate = rate_or(payload.tax_rate.as_ref(), state.billing.default_tax_rate()?)?;
    let issue_date = payload.issue_date.unwrap_or_else(|| state.today());
    let due_date = match payload.due_date {
        Some(due) => due,
        None => issue_date
            .checked_add_days(Days::new(u64::from(state.billing.payment_terms_days)))
            .ok_or_else(|| ApiError::bad_request("INVALID_DUE_DATE", "Due date out of range"))?,
    };

    let repo = DocumentRepository::new((*state.db).clone());
    let created = repo
        .create(CreateDocumentInput {
            kind,
            counterparty_id: payload.counterparty_id,
            number: payload.number,
            issue_date,
            due_date,
            tax_rate,
            gross,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(created))))
}

/// GET `/documents/{id}` - Document with payments and lateness.
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentDetailResponse>, ApiError> {
    let repo = DocumentRepository::new((*state.db).clone());
    let detail = repo.find_with_payments(id, state.today()).await?;

    Ok(Json(DocumentDetailResponse {
        document: detail.document.into(),
        days_late: detail.days_late,
        payments: detail.payments.into_iter().map(Into::into).collect(),
    }))
}

/// PUT `/documents/{id}/gross` - Correct the gross amount.
async fn correct_gross(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CorrectGrossRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let gross = payload.gross.cents()?;
    let tax_rate = payload
        .tax_rate
        .as_ref()
        .map(RateInput::basis_points)
        .transpose()?;

    let repo = DocumentRepository::new((*state.db).clone());
    Ok(Json(repo.correct_gross(id, gross, tax_rate).await?.into()))
}

/// POST `/documents/{id}/cancel`.
async fn cancel_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let repo = DocumentRepository::new((*state.db).clone());
    Ok(Json(repo.cancel(id).await?.into()))
}
