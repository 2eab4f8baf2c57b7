//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use fidu_db::entities::{expenses, sea_orm_active_enums::ExpenseCategory};
use fidu_db::repositories::{
    CreateExpenseInput, ExpenseFilter, ExpenseRepository, UpdateExpenseInput,
};
use fidu_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::counterparties::nullable;
use crate::{
    AppState,
    error::ApiError,
    money::{AmountInput, Money, RateInput, rate_or},
};

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// First day, inclusive (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Last day, inclusive (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Filter by category.
    pub category: Option<ExpenseCategory>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Date spent; today when omitted.
    pub spent_on: Option<NaiveDate>,
    /// Vendor or label.
    pub vendor: String,
    /// Category; `other` when omitted.
    pub category: Option<ExpenseCategory>,
    /// Tax-inclusive total.
    pub gross: AmountInput,
    /// VAT rate; the configured default when omitted.
    pub tax_rate: Option<RateInput>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Opaque pointer to a stored receipt.
    pub receipt_key: Option<String>,
}

/// Request body for editing an expense.
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    /// New date.
    pub spent_on: Option<NaiveDate>,
    /// New vendor.
    pub vendor: Option<String>,
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New gross amount.
    pub gross: Option<AmountInput>,
    /// New VAT rate.
    pub tax_rate: Option<RateInput>,
    /// New notes; `null` clears them.
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    /// New receipt pointer; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub receipt_key: Option<Option<String>>,
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Date spent.
    pub spent_on: NaiveDate,
    /// Vendor or label.
    pub vendor: String,
    /// Category.
    pub category: ExpenseCategory,
    /// VAT rate in basis points.
    pub tax_rate_bp: i32,
    /// Tax-inclusive total.
    pub gross: Money,
    /// Net amount.
    pub net: Money,
    /// Deductible VAT.
    pub tax: Money,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Receipt pointer.
    pub receipt_key: Option<String>,
}

impl From<expenses::Model> for ExpenseResponse {
    fn from(m: expenses::Model) -> Self {
        Self {
            id: m.id,
            spent_on: m.spent_on,
            vendor: m.vendor,
            category: m.category,
            tax_rate_bp: m.tax_rate_bp,
            gross: m.gross_cents.into(),
            net: m.net_cents.into(),
            tax: m.tax_cents.into(),
            notes: m.notes,
            receipt_key: m.receipt_key,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/expenses`.
async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<PageResponse<ExpenseResponse>>, ApiError> {
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };
    let filter = ExpenseFilter {
        from: query.from,
        to: query.to,
        category: query.category,
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    Ok(Json(repo.list(filter, &page).await?.map(ExpenseResponse::from)))
}

/// POST `/expenses`.
async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateExpenseInput {
        spent_on: payload.spent_on.unwrap_or_else(|| state.today()),
        vendor: payload.vendor,
        category: payload.category.unwrap_or(ExpenseCategory::Other),
        tax_rate: rate_or(payload.tax_rate.as_ref(), state.billing.default_tax_rate()?)?,
        gross: payload.gross.cents()?,
        notes: payload.notes,
        receipt_key: payload.receipt_key,
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    let created = repo.create(input).await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(created))))
}

/// GET `/expenses/{id}`.
async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let repo = ExpenseRepository::new((*state.db).clone());
    Ok(Json(repo.find_by_id(id).await?.into()))
}

/// PUT `/expenses/{id}`.
async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let input = UpdateExpenseInput {
        spent_on: payload.spent_on,
        vendor: payload.vendor,
        category: payload.category,
        tax_rate: payload
            .tax_rate
            .as_ref()
            .map(RateInput::basis_points)
            .transpose()?,
        gross: payload.gross.as_ref().map(AmountInput::cents).transpose()?,
        notes: payload.notes,
        receipt_key: payload.receipt_key,
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    Ok(Json(repo.update(id, input).await?.into()))
}

/// DELETE `/expenses/{id}`.
async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ExpenseRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
